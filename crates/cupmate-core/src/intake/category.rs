use serde::{Deserialize, Serialize};

/// A beverage kind. Declaration order is the ring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Drink,
    Coffee,
    Water,
    Soup,
}

impl Category {
    pub const COUNT: usize = 4;

    /// Every category, in declared order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Drink,
        Category::Coffee,
        Category::Water,
        Category::Soup,
    ];

    /// Position in the declared order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Container name shown under each cup.
    pub fn label(self) -> &'static str {
        match self {
            Category::Drink => "Drink cup",
            Category::Coffee => "Coffee cup",
            Category::Water => "Water glass",
            Category::Soup => "Soup bowl",
        }
    }

    /// Base color as `#rrggbb`; see [`Category::opacity`].
    pub fn color(self) -> &'static str {
        match self {
            Category::Drink => "#ff2d55",
            Category::Coffee => "#a2845e",
            Category::Water => "#007aff",
            Category::Soup => "#ffcc00",
        }
    }

    pub fn opacity(self) -> f64 {
        match self {
            Category::Drink => 0.5,
            Category::Coffee => 0.8,
            Category::Water => 0.7,
            Category::Soup => 0.5,
        }
    }

    /// Symbol name for the cup icon.
    pub fn icon(self) -> &'static str {
        match self {
            Category::Drink => "wineglass.fill",
            Category::Coffee => "cup.and.saucer.fill",
            Category::Water => "mug.fill",
            Category::Soup => "takeoutbag.and.cup.and.straw.fill",
        }
    }

    /// Nominal container capacity in ml.
    pub fn max_capacity(self) -> f64 {
        match self {
            Category::Drink => 1000.0,
            Category::Coffee => 500.0,
            Category::Water => 1500.0,
            Category::Soup => 800.0,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Drink => write!(f, "drink"),
            Category::Coffee => write!(f, "coffee"),
            Category::Water => write!(f, "water"),
            Category::Soup => write!(f, "soup"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drink" => Ok(Category::Drink),
            "coffee" => Ok(Category::Coffee),
            "water" => Ok(Category::Water),
            "soup" => Ok(Category::Soup),
            other => Err(format!(
                "unknown category '{other}' (expected drink, coffee, water or soup)"
            )),
        }
    }
}
