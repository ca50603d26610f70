use serde::{Deserialize, Serialize};

use super::level::Level;
use super::stage::{derive_stage, growth_pct, visual_size, Stage};

/// A plant growing under a habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub name: String,
    /// Botanical kind, e.g. "Fruit tree".
    pub kind: String,
    pub icon: String,
    /// Catalog tier the plant was planted from. Fixed for its lifetime.
    pub level: Level,
    pub days_growing: u32,
    pub total_days: u32,
    pub points: u32,
    pub stage: Stage,
}

impl Plant {
    /// Age the plant by one practice session and recompute its stage.
    pub fn grow(&mut self, points: u32) {
        self.days_growing += 1;
        self.total_days += 1;
        self.points += points;
        self.stage = derive_stage(self.days_growing, self.total_days);
    }

    pub fn growth_pct(&self) -> f64 {
        growth_pct(self.days_growing, self.total_days)
    }

    pub fn visual_size(&self) -> f64 {
        visual_size(self.stage, self.level)
    }

    /// Start the plant `days` into its growth.
    pub fn with_days_growing(mut self, days: u32) -> Self {
        self.days_growing = days;
        self.stage = derive_stage(self.days_growing, self.total_days);
        self
    }
}

/// A plant that can be sown at a given level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub kind: &'static str,
    pub icon: &'static str,
    pub level: Level,
    /// Points the plant starts with.
    pub points: u32,
    /// Days until full bloom.
    pub days: u32,
}

impl CatalogEntry {
    const fn new(
        name: &'static str,
        kind: &'static str,
        icon: &'static str,
        level: Level,
    ) -> Self {
        let (points, days) = match level {
            Level::Beginner => (5, 3),
            Level::Intermediate => (20, 14),
            Level::Pro => (100, 30),
        };
        Self {
            name,
            kind,
            icon,
            level,
            points,
            days,
        }
    }

    /// A freshly sown plant.
    pub fn plant(&self, id: impl Into<String>) -> Plant {
        Plant {
            id: id.into(),
            name: self.name.to_string(),
            kind: self.kind.to_string(),
            icon: self.icon.to_string(),
            level: self.level,
            days_growing: 0,
            total_days: self.days,
            points: self.points,
            stage: derive_stage(0, self.days),
        }
    }
}

const BEGINNER: &[CatalogEntry] = &[
    CatalogEntry::new("Cactus", "Succulent", "🌵", Level::Beginner),
    CatalogEntry::new("Basil", "Herb", "🌿", Level::Beginner),
    CatalogEntry::new("Daisy", "Flower", "🌼", Level::Beginner),
    CatalogEntry::new("Succulent", "Decorative plant", "🪴", Level::Beginner),
];

const INTERMEDIATE: &[CatalogEntry] = &[
    CatalogEntry::new("Tomato", "Vegetable", "🍅", Level::Intermediate),
    CatalogEntry::new("Rose", "Shrub", "🌹", Level::Intermediate),
    CatalogEntry::new("Fern", "Decorative plant", "🌿", Level::Intermediate),
    CatalogEntry::new("Lavender", "Aromatic plant", "💜", Level::Intermediate),
    CatalogEntry::new("Sunflower", "Large flower", "🌻", Level::Intermediate),
];

const PRO: &[CatalogEntry] = &[
    CatalogEntry::new("Cherry tree", "Fruit tree", "🌸", Level::Pro),
    CatalogEntry::new("Apple tree", "Fruit tree", "🍎", Level::Pro),
    CatalogEntry::new("Oak", "Ornamental tree", "🌳", Level::Pro),
    CatalogEntry::new("Pine", "Evergreen tree", "🌲", Level::Pro),
    CatalogEntry::new("Lemon tree", "Fruit tree", "🍋", Level::Pro),
];

/// Plants available at `level`.
pub fn catalog(level: Level) -> &'static [CatalogEntry] {
    match level {
        Level::Beginner => BEGINNER,
        Level::Intermediate => INTERMEDIATE,
        Level::Pro => PRO,
    }
}

/// Catalog entry by name, any level.
pub fn find_in_catalog(name: &str) -> Option<&'static CatalogEntry> {
    [BEGINNER, INTERMEDIATE, PRO]
        .into_iter()
        .flatten()
        .find(|entry| entry.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_tiers_share_growth_terms() {
        for level in [Level::Beginner, Level::Intermediate, Level::Pro] {
            let entries = catalog(level);
            assert!(!entries.is_empty());
            assert!(entries.iter().all(|e| e.level == level));
        }
        assert!(catalog(Level::Pro).iter().all(|e| e.days == 30 && e.points == 100));
    }

    #[test]
    fn sown_plant_starts_as_seed() {
        let plant = catalog(Level::Intermediate)[1].plant("p9");
        assert_eq!(plant.name, "Rose");
        assert_eq!(plant.stage, Stage::Seed);
        assert_eq!(plant.total_days, 14);
        assert_eq!(plant.points, 20);
        assert_eq!(plant.growth_pct(), 0.0);
    }

    #[test]
    fn grow_recomputes_stage() {
        let mut plant = find_in_catalog("daisy").unwrap().plant("p1").with_days_growing(2);
        assert_eq!(plant.stage, Stage::Developed);

        plant.grow(5);
        assert_eq!((plant.days_growing, plant.total_days), (3, 4));
        assert_eq!(plant.points, 10);
        assert_eq!(plant.stage, Stage::Developed);
        assert_eq!(plant.growth_pct(), 75.0);
        assert_eq!(plant.visual_size(), 40.0 * 0.85);
    }
}
