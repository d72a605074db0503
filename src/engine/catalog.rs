/// Upgrade catalog and difficulty settings.

/// What an upgrade contributes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeKind {
    /// Adds to drops-per-click when purchased.
    ClickBoost,
    /// Adds to drops-per-second while owned.
    PassiveGenerator,
}

/// The ten purchasable upgrade types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeKey {
    Bucket,
    Pump,
    Well,
    WaterTower,
    FiltrationPlant,
    IrrigationNetwork,
    Reservoir,
    HydroDam,
    DesalinationPlant,
    OrbitalCollector,
}

impl UpgradeKey {
    /// All upgrade keys in shop display order.
    pub fn all() -> &'static [UpgradeKey] {
        &[
            UpgradeKey::Bucket,
            UpgradeKey::Pump,
            UpgradeKey::Well,
            UpgradeKey::WaterTower,
            UpgradeKey::FiltrationPlant,
            UpgradeKey::IrrigationNetwork,
            UpgradeKey::Reservoir,
            UpgradeKey::HydroDam,
            UpgradeKey::DesalinationPlant,
            UpgradeKey::OrbitalCollector,
        ]
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKey::Bucket => "Bucket",
            UpgradeKey::Pump => "Pump",
            UpgradeKey::Well => "Well",
            UpgradeKey::WaterTower => "Water Tower",
            UpgradeKey::FiltrationPlant => "Filtration Plant",
            UpgradeKey::IrrigationNetwork => "Irrigation Network",
            UpgradeKey::Reservoir => "Reservoir",
            UpgradeKey::HydroDam => "Hydroelectric Dam",
            UpgradeKey::DesalinationPlant => "Desalination Plant",
            UpgradeKey::OrbitalCollector => "Orbital Collector",
        }
    }

    /// Short shop description.
    pub fn desc(&self) -> &'static str {
        match self {
            UpgradeKey::Bucket => "+1/click",
            UpgradeKey::Pump => "+1/sec",
            UpgradeKey::Well => "+5/sec",
            UpgradeKey::WaterTower => "+20/sec",
            UpgradeKey::FiltrationPlant => "+100/sec",
            UpgradeKey::IrrigationNetwork => "+500/sec",
            UpgradeKey::Reservoir => "+2500/sec",
            UpgradeKey::HydroDam => "+10000/sec",
            UpgradeKey::DesalinationPlant => "+50000/sec",
            UpgradeKey::OrbitalCollector => "+250000/sec",
        }
    }

    /// Cost of the first unit, before the difficulty multiplier.
    pub fn base_cost(&self) -> f64 {
        match self {
            UpgradeKey::Bucket => 10.0,
            UpgradeKey::Pump => 25.0,
            UpgradeKey::Well => 100.0,
            UpgradeKey::WaterTower => 500.0,
            UpgradeKey::FiltrationPlant => 2_500.0,
            UpgradeKey::IrrigationNetwork => 10_000.0,
            UpgradeKey::Reservoir => 50_000.0,
            UpgradeKey::HydroDam => 250_000.0,
            UpgradeKey::DesalinationPlant => 1_000_000.0,
            UpgradeKey::OrbitalCollector => 5_000_000.0,
        }
    }

    pub fn kind(&self) -> UpgradeKind {
        match self {
            UpgradeKey::Bucket => UpgradeKind::ClickBoost,
            _ => UpgradeKind::PassiveGenerator,
        }
    }

    /// Amount added per unit owned: to drops-per-click for `ClickBoost`,
    /// to drops-per-second for `PassiveGenerator`.
    pub fn increment(&self) -> f64 {
        match self {
            UpgradeKey::Bucket => 1.0,
            UpgradeKey::Pump => 1.0,
            UpgradeKey::Well => 5.0,
            UpgradeKey::WaterTower => 20.0,
            UpgradeKey::FiltrationPlant => 100.0,
            UpgradeKey::IrrigationNetwork => 500.0,
            UpgradeKey::Reservoir => 2_500.0,
            UpgradeKey::HydroDam => 10_000.0,
            UpgradeKey::DesalinationPlant => 50_000.0,
            UpgradeKey::OrbitalCollector => 250_000.0,
        }
    }

    /// Multiplicative cost growth per unit owned.
    pub fn cost_scale(&self) -> f64 {
        match self {
            UpgradeKey::Bucket => 1.6,
            UpgradeKey::Pump => 1.7,
            _ => 1.15,
        }
    }

    /// Position in `all()`, used for shop rows and keyboard mapping.
    pub fn index(&self) -> usize {
        UpgradeKey::all().iter().position(|k| k == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<UpgradeKey> {
        UpgradeKey::all().get(index).copied()
    }
}

/// Session difficulty, chosen once on the start screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Per-difficulty economy tuning.
#[derive(Clone, Copy, Debug)]
pub struct DifficultySetting {
    /// Multiplier applied to all base costs at session start.
    pub cost_mult: f64,
    /// Random events run iff this is positive.
    pub event_chance: f64,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn settings(&self) -> DifficultySetting {
        match self {
            Difficulty::Easy => DifficultySetting { cost_mult: 1.0, event_chance: 0.0 },
            Difficulty::Medium => DifficultySetting { cost_mult: 1.4, event_chance: 0.0 },
            Difficulty::Hard => DifficultySetting { cost_mult: 2.0, event_chance: 1.0 },
        }
    }
}
