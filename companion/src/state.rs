use serde::{Deserialize, Serialize};

/// Experience points per companion level.
pub const LEVEL_STEP: u64 = 1000;

/// Externally driven emotional state; there are no automatic
/// transitions outside the chat-turn and travel paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Calm,
    Thinking,
    Excited,
    Emo,
}

/// Two-state travel machine. Both transitions are explicit; the
/// companion comes home when told to, never on a timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Travel {
    #[default]
    AtHome,
    Traveling,
}

/// How much autonomy the trust score currently grants.
///
/// The two lower tiers demand the same confirm gesture today; they stay
/// separate variants because the policy intent differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustPolicy {
    /// trust >= 80: act without asking.
    AutoExecute,
    /// 50 <= trust < 80: normal confirmation.
    Confirm,
    /// trust < 50: confirmation, guarded intent.
    ConfirmGuarded,
}

/// The companion's vitals. Setters clamp, so out-of-range values can
/// never reach observable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanionState {
    health: u8,
    mood: Mood,
    location: String,
    trust: u8,
    travel: Travel,
    xp: u64,
}

impl Default for CompanionState {
    fn default() -> Self {
        Self {
            health: 87,
            mood: Mood::Calm,
            location: "neural void".into(),
            trust: 72,
            travel: Travel::AtHome,
            xp: 0,
        }
    }
}

fn clamp_vital(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

impl CompanionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn trust(&self) -> u8 {
        self.trust
    }

    pub fn travel(&self) -> Travel {
        self.travel
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_health(&mut self, value: i64) {
        self.health = clamp_vital(value);
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.mood = mood;
    }

    pub fn set_trust(&mut self, value: i64) {
        self.trust = clamp_vital(value);
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn heal(&mut self, amount: i64) {
        self.set_health(self.health as i64 + amount);
    }

    pub fn drain(&mut self, amount: i64) {
        self.set_health(self.health as i64 - amount);
    }

    pub fn boost_sync(&mut self, amount: i64) {
        self.set_trust(self.trust as i64 + amount);
    }

    pub fn decay_sync(&mut self, amount: i64) {
        self.set_trust(self.trust as i64 - amount);
    }

    /// Leave home. Idempotent while already traveling.
    pub fn start_travel(&mut self) {
        if self.travel == Travel::Traveling {
            return;
        }
        self.travel = Travel::Traveling;
        self.mood = Mood::Excited;
    }

    /// Come home. Only ever triggered explicitly.
    pub fn return_home(&mut self) {
        self.travel = Travel::AtHome;
        self.mood = Mood::Calm;
    }

    /// Experience only ever grows.
    pub fn grant_xp(&mut self, amount: u64) {
        self.xp = self.xp.saturating_add(amount);
    }

    /// Level is a pure function of experience, never stored, so the two
    /// cannot drift apart.
    pub fn level(&self) -> u64 {
        self.xp / LEVEL_STEP + 1
    }

    pub fn trust_policy(&self) -> TrustPolicy {
        match self.trust {
            80..=100 => TrustPolicy::AutoExecute,
            50..=79 => TrustPolicy::Confirm,
            _ => TrustPolicy::ConfirmGuarded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_clamps_at_both_ends() {
        let mut state = CompanionState::new();
        state.set_health(150);
        assert_eq!(state.health(), 100);
        state.set_health(-20);
        assert_eq!(state.health(), 0);
    }

    #[test]
    fn compound_vitals_ops_clamp_too() {
        let mut state = CompanionState::new();
        state.set_health(95);
        state.heal(30);
        assert_eq!(state.health(), 100);
        state.drain(250);
        assert_eq!(state.health(), 0);

        state.set_trust(10);
        state.decay_sync(40);
        assert_eq!(state.trust(), 0);
        state.boost_sync(500);
        assert_eq!(state.trust(), 100);
    }

    #[test]
    fn travel_transitions_are_explicit_and_idempotent() {
        let mut state = CompanionState::new();
        assert_eq!(state.travel(), Travel::AtHome);

        state.start_travel();
        assert_eq!(state.travel(), Travel::Traveling);
        assert_eq!(state.mood(), Mood::Excited);

        // Repeating the departure changes nothing, even a later mood.
        state.set_mood(Mood::Emo);
        state.start_travel();
        assert_eq!(state.mood(), Mood::Emo);

        state.return_home();
        assert_eq!(state.travel(), Travel::AtHome);
        assert_eq!(state.mood(), Mood::Calm);
    }

    #[test]
    fn level_is_derived_purely_from_xp() {
        let mut state = CompanionState::new();
        assert_eq!(state.level(), 1);
        state.grant_xp(999);
        assert_eq!(state.level(), 1);
        state.grant_xp(1);
        assert_eq!(state.level(), 2);
        state.grant_xp(29_000);
        assert_eq!(state.level(), 31);
        // Repeated reads do not drift.
        assert_eq!(state.level(), state.level());
    }

    #[test]
    fn trust_gates_three_policies() {
        let mut state = CompanionState::new();
        state.set_trust(80);
        assert_eq!(state.trust_policy(), TrustPolicy::AutoExecute);
        state.set_trust(79);
        assert_eq!(state.trust_policy(), TrustPolicy::Confirm);
        state.set_trust(50);
        assert_eq!(state.trust_policy(), TrustPolicy::Confirm);
        state.set_trust(49);
        assert_eq!(state.trust_policy(), TrustPolicy::ConfirmGuarded);
    }
}
