pub mod json_api;

pub use json_api::{
    create_player_json, create_team_json, delete_player_json, delete_team_json, disciplinary_json,
    goalkeeper_ranking_json, record_result_json, schedule_match_json, standings_json,
    top_scorers_json, ApiError, ApiResponse, CreatePlayerRequest, CreateTeamRequest,
    RecordResultRequest, ScheduleMatchRequest, ScorerEventDto, API_VERSION,
    DEFAULT_LEADERBOARD_LIMIT,
};
