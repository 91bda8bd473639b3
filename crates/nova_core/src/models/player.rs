use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Squad position taxonomy used by the roster forms.
///
/// The coarse grouping (`is_goalkeeper` etc.) is what the aggregators care
/// about; the finer labels exist for display and squad-quota hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    Defender,
    FullBack,
    Midfielder,
    AttackingMid,
    Winger,
    Forward,
}

impl Position {
    pub fn all() -> &'static [Position] {
        &[
            Position::Goalkeeper,
            Position::Defender,
            Position::FullBack,
            Position::Midfielder,
            Position::AttackingMid,
            Position::Winger,
            Position::Forward,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::FullBack => "Full-back",
            Position::Midfielder => "Midfielder",
            Position::AttackingMid => "Attacking midfielder",
            Position::Winger => "Winger",
            Position::Forward => "Forward",
        }
    }

    /// Parse from string (case-insensitive), accepting both the enum names
    /// and the display names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "goalkeeper" | "gk" => Some(Position::Goalkeeper),
            "defender" | "df" => Some(Position::Defender),
            "full_back" | "fullback" => Some(Position::FullBack),
            "midfielder" | "mf" => Some(Position::Midfielder),
            "attacking_mid" | "attacking_midfielder" => Some(Position::AttackingMid),
            "winger" => Some(Position::Winger),
            "forward" | "fw" | "striker" => Some(Position::Forward),
            _ => None,
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::Goalkeeper)
    }

    pub fn is_defender(&self) -> bool {
        matches!(self, Position::Defender | Position::FullBack)
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(self, Position::Midfielder | Position::AttackingMid)
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Position::Winger | Position::Forward)
    }

    /// Recommended squad quota per position for a full 15-man roster.
    pub fn squad_quota(&self) -> u8 {
        match self {
            Position::Goalkeeper => 2,
            Position::Defender => 3,
            Position::FullBack => 2,
            Position::Midfielder => 3,
            Position::AttackingMid => 1,
            Position::Winger => 2,
            Position::Forward => 2,
        }
    }
}

/// A registered player.
///
/// The `goals`/`yellow_cards`/`red_cards` counters are a cache of the totals
/// derivable from finalized match events. The recorder refreshes them on
/// every result commit; the leaderboards only trust them when a match set
/// carries no event detail at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shirt_number: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub team_id: String,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    pub red_cards: u32,
    pub registered_at: DateTime<Utc>,
}

impl Player {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        team_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            shirt_number: None,
            position: None,
            team_id: team_id.into(),
            goals: 0,
            yellow_cards: 0,
            red_cards: 0,
            registered_at: Utc::now(),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_shirt_number(mut self, number: u8) -> Self {
        self.shirt_number = Some(number);
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.position.map(|p| p.is_goalkeeper()).unwrap_or(false)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err("player first and last name must not be empty".to_string());
        }
        if self.team_id.trim().is_empty() {
            return Err("player must reference a team".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_parsing_accepts_common_spellings() {
        assert_eq!(Position::parse("Goalkeeper"), Some(Position::Goalkeeper));
        assert_eq!(Position::parse("gk"), Some(Position::Goalkeeper));
        assert_eq!(Position::parse("full-back"), Some(Position::FullBack));
        assert_eq!(Position::parse("attacking midfielder"), Some(Position::AttackingMid));
        assert_eq!(Position::parse("striker"), Some(Position::Forward));
        assert_eq!(Position::parse("libero"), None);
    }

    #[test]
    fn position_groups() {
        assert!(Position::Goalkeeper.is_goalkeeper());
        assert!(Position::FullBack.is_defender());
        assert!(Position::AttackingMid.is_midfielder());
        assert!(Position::Winger.is_forward());
        assert!(!Position::Forward.is_midfielder());
    }

    #[test]
    fn squad_quotas_sum_to_full_roster() {
        let total: u8 = Position::all().iter().map(|p| p.squad_quota()).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn new_player_starts_with_zeroed_counters() {
        let player = Player::new("Ana", "Rojas", "team-1");
        assert_eq!(player.goals, 0);
        assert_eq!(player.yellow_cards, 0);
        assert_eq!(player.red_cards, 0);
        assert_eq!(player.full_name(), "Ana Rojas");
    }

    #[test]
    fn goalkeeper_check_requires_position() {
        let player = Player::new("Iván", "Mora", "team-1");
        assert!(!player.is_goalkeeper());
        let keeper = player.with_position(Position::Goalkeeper);
        assert!(keeper.is_goalkeeper());
    }
}
