//! Static configuration tables and balance parameters.
//!
//! Everything the simulation treats as immutable input lives here: the
//! recipe book, ingredient capacities, equipment catalog, staff traits,
//! moods, morale factor rules, the starting roster, and the tunable
//! numbers behind the performance model and the economy.
//!
//! Tables are loaded once from JSON and validated with
//! [`GameConfig::validate`]. When loading fails, callers fall back to
//! [`GameConfig::default`], which carries a complete built-in table set of
//! the same shape (see [`GameConfig::load_or_default`]).

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::equipment::EquipmentEffect;
use crate::mood::Mood;
use crate::performance::MoraleEvent;

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse JSON content.
    #[error("failed to parse config JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Parsed tables are internally inconsistent.
    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

/// Recipe category. Staff specialties are expressed in the same terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cuisine {
    Italian,
    Asian,
    Grill,
    Seafood,
    Vegetarian,
}

impl Cuisine {
    pub const ALL: [Cuisine; 5] = [
        Cuisine::Italian,
        Cuisine::Asian,
        Cuisine::Grill,
        Cuisine::Seafood,
        Cuisine::Vegetarian,
    ];
}

/// A dish that can appear as an order line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: Cuisine,
    /// One unit of each listed ingredient is needed per portion.
    pub ingredients: Vec<String>,
    pub price: u32,
    /// Base preparation time in seconds.
    pub time: u32,
    /// Lifetime earnings needed before the recipe shows up in orders.
    #[serde(default)]
    pub unlock_threshold: i64,
}

/// Pantry slot definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientDef {
    pub name: String,
    pub max: u32,
}

/// Equipment catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDef {
    pub id: String,
    pub name: String,
    pub effect: EquipmentEffect,
    pub effect_per_level: f32,
    pub max_level: u8,
    /// Cost of the first upgrade; each further level costs one more multiple.
    pub base_cost: i64,
    #[serde(default)]
    pub starting_level: u8,
}

/// Immutable personality modifier assigned at hire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitDef {
    pub id: String,
    pub name: String,
    /// Points added to the 100-point base performance score.
    #[serde(default)]
    pub performance: f32,
    /// Multiplier on fatigue gained while busy.
    #[serde(default = "one")]
    pub fatigue_rate: f32,
    /// Multiplier on positive morale changes.
    #[serde(default = "one")]
    pub morale_gain: f32,
}

fn one() -> f32 {
    1.0
}

/// Mood definition with eligibility bounds.
///
/// A mood is only drawn when the staff member's fatigue and morale sit
/// inside the optional bounds (a well-rested cook cannot become `Tired`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodDef {
    pub mood: Mood,
    pub multiplier: f32,
    pub weight: f32,
    #[serde(default)]
    pub min_fatigue: Option<f32>,
    #[serde(default)]
    pub max_fatigue: Option<f32>,
    #[serde(default)]
    pub min_morale: Option<f32>,
    #[serde(default)]
    pub max_morale: Option<f32>,
}

/// Gating condition for a morale factor. Unset bounds always pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoraleCondition {
    #[serde(default)]
    pub min_fatigue: Option<f32>,
    #[serde(default)]
    pub max_fatigue: Option<f32>,
    #[serde(default)]
    pub min_performance: Option<f32>,
    #[serde(default)]
    pub min_consecutive_orders: Option<u32>,
    #[serde(default)]
    pub min_idle_ticks: Option<u32>,
}

/// A named morale event with its signed delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoraleFactor {
    pub event: MoraleEvent,
    pub delta: f32,
    #[serde(default)]
    pub condition: MoraleCondition,
}

/// Starting roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffTemplate {
    pub name: String,
    pub role: String,
    pub base_efficiency: f32,
    pub specialty: Cuisine,
    pub traits: Vec<String>,
}

/// One band of a step curve: values up to and including `up_to` map to `multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveStep {
    pub up_to: f32,
    pub multiplier: f32,
}

/// Piecewise-constant mapping from a 0–100 stat to a multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepCurve {
    /// Bands in ascending `up_to` order.
    pub steps: Vec<CurveStep>,
    /// Multiplier above the last band.
    pub otherwise: f32,
}

impl StepCurve {
    pub fn eval(&self, value: f32) -> f32 {
        self.steps
            .iter()
            .find(|s| value <= s.up_to)
            .map(|s| s.multiplier)
            .unwrap_or(self.otherwise)
    }

    fn multipliers(&self) -> impl Iterator<Item = f32> + '_ {
        self.steps
            .iter()
            .map(|s| s.multiplier)
            .chain(std::iter::once(self.otherwise))
    }

    fn is_ascending(&self) -> bool {
        self.steps.windows(2).all(|w| w[0].up_to < w[1].up_to)
    }
}

/// Which busy staff member a priority order takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreemptionPolicy {
    /// Highest morale wins (the default policy).
    HighestMorale,
    /// Whoever has made the least progress on their current order.
    LeastProgress,
}

/// Staff performance model parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub upgrade_bonus_per_level: f32,
    pub max_upgrade_level: u8,
    /// Fatigue gained per busy tick before equipment and trait scaling.
    pub fatigue_gain_rate: f32,
    pub idle_recovery_rate: f32,
    pub rest_recovery_rate: f32,
    /// Resting staff return to work below this fatigue.
    pub rest_exit_threshold: f32,
    /// Send tired staff to rest after finishing an order.
    pub auto_rest: bool,
    pub auto_rest_threshold: f32,
    pub fatigue_curve: StepCurve,
    pub morale_curve: StepCurve,
    /// Progress points per tick at efficiency 1.0.
    pub throughput: f32,
    pub specialty_bonus: f32,
    pub top_performer_bonus: f32,
    /// Ticks the top-performer bonus lasts after being granted.
    pub top_performer_duration: u32,
    pub mood_timer_min: u32,
    pub mood_timer_max: u32,
    pub baseline_morale: f32,
    pub base_performance: f32,
    pub performance_gain: f32,
    pub performance_loss: f32,
    pub performance_recovery: f32,
    pub loyalty_gain: f32,
    pub loyalty_loss_preempted: f32,
    /// Cap applied to every aggregate equipment bonus.
    pub max_equipment_bonus: f32,
    pub preemption: PreemptionPolicy,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            upgrade_bonus_per_level: 0.1,
            max_upgrade_level: 3,
            fatigue_gain_rate: 0.3,
            idle_recovery_rate: 0.2,
            rest_recovery_rate: 1.0,
            rest_exit_threshold: 20.0,
            auto_rest: true,
            auto_rest_threshold: 80.0,
            fatigue_curve: StepCurve {
                steps: vec![
                    CurveStep { up_to: 30.0, multiplier: 1.0 },
                    CurveStep { up_to: 60.0, multiplier: 0.9 },
                    CurveStep { up_to: 80.0, multiplier: 0.75 },
                ],
                otherwise: 0.6,
            },
            morale_curve: StepCurve {
                steps: vec![
                    CurveStep { up_to: 20.0, multiplier: 0.8 },
                    CurveStep { up_to: 40.0, multiplier: 0.9 },
                    CurveStep { up_to: 70.0, multiplier: 1.0 },
                ],
                otherwise: 1.1,
            },
            throughput: 1.5,
            specialty_bonus: 0.15,
            top_performer_bonus: 0.1,
            top_performer_duration: 180,
            mood_timer_min: 60,
            mood_timer_max: 120,
            baseline_morale: 50.0,
            base_performance: 100.0,
            performance_gain: 2.0,
            performance_loss: 5.0,
            performance_recovery: 0.5,
            loyalty_gain: 1.0,
            loyalty_loss_preempted: 2.0,
            max_equipment_bonus: 0.5,
            preemption: PreemptionPolicy::HighestMorale,
        }
    }
}

/// Order intake parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Ticks between order generation attempts.
    pub generation_interval: u32,
    pub base_spawn_chance: f32,
    pub spawn_chance_step: f32,
    pub max_spawn_chance: f32,
    /// Ceiling on the final per-attempt probability.
    pub max_spawn_probability: f32,
    /// Day fraction boundaries for the quiet and rush phases.
    pub quiet_until: f32,
    pub rush_after: f32,
    pub quiet_multiplier: f32,
    pub steady_multiplier: f32,
    pub rush_multiplier: f32,
    pub staff_factor_base: f32,
    pub staff_factor_per_available: f32,
    pub max_live_orders: usize,
    pub max_items_per_order: usize,
    /// Seconds added to the slowest item's prep time to form the deadline.
    pub time_buffer: u32,
    pub vip_chance: f32,
    pub vip_price_multiplier: f32,
    /// Pending orders below this fraction of their time limit are force-assigned.
    pub urgent_fraction: f32,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            generation_interval: 5,
            base_spawn_chance: 0.4,
            spawn_chance_step: 0.05,
            max_spawn_chance: 0.8,
            max_spawn_probability: 0.95,
            quiet_until: 0.3,
            rush_after: 0.7,
            quiet_multiplier: 0.7,
            steady_multiplier: 1.0,
            rush_multiplier: 1.4,
            staff_factor_base: 0.8,
            staff_factor_per_available: 0.1,
            max_live_orders: 12,
            max_items_per_order: 3,
            time_buffer: 30,
            vip_chance: 0.1,
            vip_price_multiplier: 1.5,
            urgent_fraction: 0.3,
        }
    }
}

/// Money, reputation and satisfaction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_revenue: i64,
    /// Ticks per in-game day.
    pub day_duration: u32,
    pub days_per_month: u32,
    pub ingredient_unit_cost: i64,
    pub end_of_day_bonus_rate: f32,
    pub reputation_bonus_rate: f32,
    pub full_restock_cost: i64,
    pub unit_restock_cost: i64,
    pub hire_cost: i64,
    pub max_staff: usize,
    pub hire_efficiency_min: f32,
    pub hire_efficiency_max: f32,
    pub staff_upgrade_cost: i64,
    pub ambient_decay_threshold: usize,
    pub ambient_decay: f32,
    pub satisfaction_gain: f32,
    pub vip_satisfaction_gain: f32,
    pub satisfaction_penalty: f32,
    pub vip_satisfaction_penalty: f32,
    pub reputation_gain: u32,
    pub vip_reputation_gain: u32,
    /// Revenue at which the Tycoon achievement unlocks.
    pub tycoon_revenue: i64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_revenue: 500,
            day_duration: 180,
            days_per_month: 30,
            ingredient_unit_cost: 2,
            end_of_day_bonus_rate: 0.1,
            reputation_bonus_rate: 0.5,
            full_restock_cost: 50,
            unit_restock_cost: 1,
            hire_cost: 150,
            max_staff: 8,
            hire_efficiency_min: 0.6,
            hire_efficiency_max: 0.9,
            staff_upgrade_cost: 100,
            ambient_decay_threshold: 5,
            ambient_decay: 0.5,
            satisfaction_gain: 2.0,
            vip_satisfaction_gain: 4.0,
            satisfaction_penalty: 10.0,
            vip_satisfaction_penalty: 20.0,
            reputation_gain: 1,
            vip_reputation_gain: 3,
            tycoon_revenue: 1000,
        }
    }
}

/// Recipe mastery progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasteryConfig {
    /// Completions needed for each successive mastery level.
    pub thresholds: Vec<u32>,
    pub speed_bonus_per_level: f32,
    pub price_bonus_per_level: f32,
}

impl Default for MasteryConfig {
    fn default() -> Self {
        Self {
            thresholds: vec![5, 15, 30],
            speed_bonus_per_level: 0.05,
            price_bonus_per_level: 0.05,
        }
    }
}

/// Complete configuration handed to the engine at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub recipes: Vec<Recipe>,
    pub ingredients: Vec<IngredientDef>,
    pub equipment: Vec<EquipmentDef>,
    pub traits: Vec<TraitDef>,
    pub moods: Vec<MoodDef>,
    pub morale_factors: Vec<MoraleFactor>,
    pub roster: Vec<StaffTemplate>,
    #[serde(default)]
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub orders: OrderConfig,
    #[serde(default)]
    pub economy: EconomyConfig,
    #[serde(default)]
    pub mastery: MasteryConfig,
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Load from `path`, substituting the built-in tables on any failure.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded game config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Falling back to built-in config ({}): {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn trait_def(&self, id: &str) -> Option<&TraitDef> {
        self.traits.iter().find(|t| t.id == id)
    }

    pub fn equipment_def(&self, id: &str) -> Option<&EquipmentDef> {
        self.equipment.iter().find(|e| e.id == id)
    }

    /// Check cross-table references and numeric ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recipes.is_empty() {
            return Err(invalid("recipe table is empty"));
        }
        if self.ingredients.is_empty() {
            return Err(invalid("ingredient table is empty"));
        }

        let ingredient_names: BTreeSet<&str> =
            self.ingredients.iter().map(|i| i.name.as_str()).collect();
        if ingredient_names.len() != self.ingredients.len() {
            return Err(invalid("duplicate ingredient names"));
        }

        let mut recipe_ids = BTreeSet::new();
        for recipe in &self.recipes {
            if !recipe_ids.insert(recipe.id.as_str()) {
                return Err(invalid(format!("duplicate recipe id '{}'", recipe.id)));
            }
            if recipe.ingredients.is_empty() {
                return Err(invalid(format!("recipe '{}' has no ingredients", recipe.id)));
            }
            if let Some(missing) = recipe
                .ingredients
                .iter()
                .find(|i| !ingredient_names.contains(i.as_str()))
            {
                return Err(invalid(format!(
                    "recipe '{}' uses unknown ingredient '{}'",
                    recipe.id, missing
                )));
            }
        }
        if !self.recipes.iter().any(|r| r.unlock_threshold <= 0) {
            return Err(invalid("no recipe is unlocked at start"));
        }

        for eq in &self.equipment {
            if eq.effect_per_level < 0.0 {
                return Err(invalid(format!("equipment '{}' has negative effect", eq.id)));
            }
            if eq.starting_level > eq.max_level {
                return Err(invalid(format!(
                    "equipment '{}' starts above its max level",
                    eq.id
                )));
            }
        }

        for t in &self.traits {
            if t.fatigue_rate <= 0.0 || t.morale_gain <= 0.0 {
                return Err(invalid(format!("trait '{}' has non-positive rate", t.id)));
            }
        }
        if self.traits.len() < 2 {
            return Err(invalid("at least two traits are needed for hiring"));
        }

        if self.moods.is_empty() {
            return Err(invalid("mood table is empty"));
        }
        if !self.moods.iter().any(|m| m.mood == Mood::Neutral) {
            return Err(invalid("mood table must define Neutral"));
        }
        if let Some(m) = self
            .moods
            .iter()
            .find(|m| m.multiplier <= 0.0 || m.weight < 0.0)
        {
            return Err(invalid(format!("mood {:?} has invalid multiplier or weight", m.mood)));
        }

        for template in &self.roster {
            if template.base_efficiency <= 0.0 {
                return Err(invalid(format!("'{}' has non-positive efficiency", template.name)));
            }
            if let Some(missing) = template.traits.iter().find(|t| self.trait_def(t).is_none()) {
                return Err(invalid(format!(
                    "'{}' references unknown trait '{}'",
                    template.name, missing
                )));
            }
        }

        let perf = &self.performance;
        for (name, curve) in [("fatigue", &perf.fatigue_curve), ("morale", &perf.morale_curve)] {
            if curve.multipliers().any(|m| m <= 0.0) {
                return Err(invalid(format!("{} curve must stay positive", name)));
            }
            if !curve.is_ascending() {
                return Err(invalid(format!("{} curve bands must ascend", name)));
            }
        }
        if perf.mood_timer_min == 0 || perf.mood_timer_min > perf.mood_timer_max {
            return Err(invalid("mood timer range is empty"));
        }
        if perf.throughput <= 0.0 {
            return Err(invalid("throughput must be positive"));
        }
        if !(0.0..1.0).contains(&perf.max_equipment_bonus) {
            return Err(invalid("max equipment bonus must be in [0, 1)"));
        }

        let orders = &self.orders;
        if orders.generation_interval == 0 {
            return Err(invalid("generation interval must be positive"));
        }
        if orders.max_items_per_order == 0 {
            return Err(invalid("orders need at least one item"));
        }
        for (name, p) in [
            ("base_spawn_chance", orders.base_spawn_chance),
            ("max_spawn_chance", orders.max_spawn_chance),
            ("max_spawn_probability", orders.max_spawn_probability),
            ("vip_chance", orders.vip_chance),
            ("urgent_fraction", orders.urgent_fraction),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{} must be a probability", name)));
            }
        }

        let economy = &self.economy;
        if economy.day_duration == 0 || economy.days_per_month == 0 {
            return Err(invalid("day and month lengths must be positive"));
        }
        if economy.hire_efficiency_min <= 0.0
            || economy.hire_efficiency_min > economy.hire_efficiency_max
        {
            return Err(invalid("hire efficiency range is invalid"));
        }
        if !self.mastery.thresholds.windows(2).all(|w| w[0] < w[1]) {
            return Err(invalid("mastery thresholds must ascend"));
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            recipes: default_recipes(),
            ingredients: default_ingredients(),
            equipment: default_equipment(),
            traits: default_traits(),
            moods: default_moods(),
            morale_factors: default_morale_factors(),
            roster: default_roster(),
            performance: PerformanceConfig::default(),
            orders: OrderConfig::default(),
            economy: EconomyConfig::default(),
            mastery: MasteryConfig::default(),
        }
    }
}

fn recipe(
    id: &str,
    name: &str,
    category: Cuisine,
    ingredients: &[&str],
    price: u32,
    time: u32,
    unlock_threshold: i64,
) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        category,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        price,
        time,
        unlock_threshold,
    }
}

fn default_recipes() -> Vec<Recipe> {
    vec![
        recipe("beef_steak", "Beef Steak", Cuisine::Grill, &["Beef", "Vegetables"], 25, 180, 0),
        recipe(
            "chicken_pasta",
            "Chicken Pasta",
            Cuisine::Italian,
            &["Chicken", "Pasta", "Tomatoes"],
            18,
            120,
            0,
        ),
        recipe("grilled_fish", "Grilled Fish", Cuisine::Seafood, &["Fish", "Vegetables"], 22, 150, 0),
        recipe(
            "vegetable_stir_fry",
            "Vegetable Stir Fry",
            Cuisine::Vegetarian,
            &["Vegetables", "Rice"],
            15,
            90,
            0,
        ),
        recipe(
            "chicken_rice_bowl",
            "Chicken Rice Bowl",
            Cuisine::Asian,
            &["Chicken", "Rice", "Vegetables"],
            16,
            100,
            0,
        ),
        recipe("cheese_pizza", "Cheese Pizza", Cuisine::Italian, &["Cheese", "Tomatoes"], 14, 120, 0),
        recipe(
            "pasta_primavera",
            "Pasta Primavera",
            Cuisine::Italian,
            &["Pasta", "Vegetables", "Cheese"],
            17,
            110,
            0,
        ),
        recipe(
            "seafood_risotto",
            "Seafood Risotto",
            Cuisine::Seafood,
            &["Fish", "Rice", "Cheese"],
            28,
            160,
            300,
        ),
        recipe(
            "beef_noodle_soup",
            "Beef Noodle Soup",
            Cuisine::Asian,
            &["Beef", "Pasta", "Vegetables"],
            24,
            140,
            600,
        ),
        recipe(
            "surf_and_turf",
            "Surf and Turf",
            Cuisine::Grill,
            &["Beef", "Fish", "Vegetables"],
            40,
            200,
            1200,
        ),
    ]
}

fn default_ingredients() -> Vec<IngredientDef> {
    [
        ("Beef", 100),
        ("Chicken", 100),
        ("Fish", 100),
        ("Vegetables", 100),
        ("Pasta", 100),
        ("Rice", 100),
        ("Cheese", 80),
        ("Tomatoes", 80),
    ]
    .into_iter()
    .map(|(name, max)| IngredientDef {
        name: name.to_string(),
        max,
    })
    .collect()
}

fn default_equipment() -> Vec<EquipmentDef> {
    let def = |id: &str, name: &str, effect, effect_per_level, base_cost| EquipmentDef {
        id: id.to_string(),
        name: name.to_string(),
        effect,
        effect_per_level,
        max_level: 5,
        base_cost,
        starting_level: 0,
    };
    vec![
        def("range", "Convection Range", EquipmentEffect::CookingSpeed, 0.05, 150),
        def("prep_station", "Prep Station", EquipmentEffect::IngredientEfficiency, 0.05, 120),
        def("plating_kit", "Plating Kit", EquipmentEffect::PriceBoost, 0.05, 200),
        def("break_room", "Break Room", EquipmentEffect::FatigueReduction, 0.08, 100),
    ]
}

fn default_traits() -> Vec<TraitDef> {
    let t = |id: &str, name: &str, performance, fatigue_rate, morale_gain| TraitDef {
        id: id.to_string(),
        name: name.to_string(),
        performance,
        fatigue_rate,
        morale_gain,
    };
    vec![
        t("hard_worker", "Hard Worker", 5.0, 0.85, 1.0),
        t("perfectionist", "Perfectionist", 10.0, 1.1, 1.0),
        t("cheerful", "Cheerful", 0.0, 1.0, 1.3),
        t("speedy", "Speedy", 5.0, 1.05, 1.0),
        t("steady", "Steady", 0.0, 0.9, 1.0),
        t("easily_distracted", "Easily Distracted", -10.0, 1.0, 1.0),
        t("team_player", "Team Player", 3.0, 1.0, 1.15),
    ]
}

fn default_moods() -> Vec<MoodDef> {
    let m = |mood, multiplier, weight| MoodDef {
        mood,
        multiplier,
        weight,
        min_fatigue: None,
        max_fatigue: None,
        min_morale: None,
        max_morale: None,
    };
    vec![
        m(Mood::Neutral, 1.0, 4.0),
        MoodDef {
            min_morale: Some(50.0),
            ..m(Mood::Happy, 1.1, 3.0)
        },
        MoodDef {
            max_fatigue: Some(40.0),
            ..m(Mood::Focused, 1.15, 2.0)
        },
        MoodDef {
            min_fatigue: Some(50.0),
            ..m(Mood::Tired, 0.85, 2.0)
        },
        MoodDef {
            max_morale: Some(45.0),
            ..m(Mood::Stressed, 0.8, 2.0)
        },
        MoodDef {
            min_morale: Some(70.0),
            max_fatigue: Some(50.0),
            ..m(Mood::Inspired, 1.25, 1.0)
        },
    ]
}

fn default_morale_factors() -> Vec<MoraleFactor> {
    let f = |event, delta, condition| MoraleFactor {
        event,
        delta,
        condition,
    };
    vec![
        f(
            MoraleEvent::HighFatigue,
            -0.1,
            MoraleCondition {
                min_fatigue: Some(70.0),
                ..Default::default()
            },
        ),
        f(
            MoraleEvent::LowFatigueHighPerformance,
            0.05,
            MoraleCondition {
                max_fatigue: Some(30.0),
                min_performance: Some(105.0),
                ..Default::default()
            },
        ),
        f(
            MoraleEvent::LongIdle,
            -0.02,
            MoraleCondition {
                min_idle_ticks: Some(60),
                ..Default::default()
            },
        ),
        f(MoraleEvent::OrderCompleted, 3.0, MoraleCondition::default()),
        f(MoraleEvent::SpecialtyMatch, 2.0, MoraleCondition::default()),
        f(
            MoraleEvent::OrderStreak,
            2.0,
            MoraleCondition {
                min_consecutive_orders: Some(3),
                ..Default::default()
            },
        ),
        f(MoraleEvent::OrderFailed, -5.0, MoraleCondition::default()),
        f(MoraleEvent::Preempted, -4.0, MoraleCondition::default()),
        f(MoraleEvent::ColleagueDismissed, -6.0, MoraleCondition::default()),
    ]
}

fn default_roster() -> Vec<StaffTemplate> {
    let s = |name: &str, role: &str, base_efficiency, specialty, traits: [&str; 2]| StaffTemplate {
        name: name.to_string(),
        role: role.to_string(),
        base_efficiency,
        specialty,
        traits: traits.iter().map(|t| t.to_string()).collect(),
    };
    vec![
        s("Chef Mario", "Head Chef", 0.9, Cuisine::Italian, ["perfectionist", "steady"]),
        s("Chef Lisa", "Sous Chef", 0.8, Cuisine::Asian, ["cheerful", "speedy"]),
        s("Cook Tom", "Line Cook", 0.7, Cuisine::Grill, ["hard_worker", "steady"]),
        s("Cook Sarah", "Line Cook", 0.7, Cuisine::Seafood, ["speedy", "team_player"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn step_curve_bands() {
        let curve = PerformanceConfig::default().fatigue_curve;
        assert!((curve.eval(0.0) - 1.0).abs() < f32::EPSILON);
        assert!((curve.eval(30.0) - 1.0).abs() < f32::EPSILON);
        assert!((curve.eval(45.0) - 0.9).abs() < f32::EPSILON);
        assert!((curve.eval(80.0) - 0.75).abs() < f32::EPSILON);
        assert!((curve.eval(100.0) - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn step_curve_bands_include_their_upper_edge() {
        let perf = PerformanceConfig::default();
        let fatigue = [(30.0, 1.0), (30.5, 0.9), (60.0, 0.9), (60.5, 0.75), (80.0, 0.75), (80.5, 0.6)];
        for (value, expected) in fatigue {
            let got = perf.fatigue_curve.eval(value);
            assert!((got - expected).abs() < f32::EPSILON, "fatigue {value} gave {got}");
        }
        let morale = [(20.0, 0.8), (20.5, 0.9), (40.0, 0.9), (40.5, 1.0), (70.0, 1.0), (70.5, 1.1)];
        for (value, expected) in morale {
            let got = perf.morale_curve.eval(value);
            assert!((got - expected).abs() < f32::EPSILON, "morale {value} gave {got}");
        }
    }

    #[test]
    fn unknown_ingredient_rejected() {
        let mut config = GameConfig::default();
        config.recipes[0].ingredients.push("Truffle".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Truffle"));
    }

    #[test]
    fn zero_multiplier_curve_rejected() {
        let mut config = GameConfig::default();
        config.performance.morale_curve.otherwise = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn unknown_roster_trait_rejected() {
        let mut config = GameConfig::default();
        config.roster[0].traits[0] = "clairvoyant".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_roundtrip_keeps_tables() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_sections_take_defaults() {
        let mut value = serde_json::to_value(GameConfig::default()).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("performance");
        obj.remove("economy");
        let parsed: GameConfig = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.performance, PerformanceConfig::default());
        assert_eq!(parsed.economy.day_duration, 180);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            GameConfig::from_json_str("{ not json"),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_or_default("/nonexistent/brigade.json");
        assert_eq!(config, GameConfig::default());
    }
}
