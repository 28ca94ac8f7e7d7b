pub mod api;
pub mod score;

pub use api::{
    ComplianceRequest, ComplianceResponse, ErrorBody, HealthResponse, SuggestionRequest,
    SuggestionResponse,
};
pub use score::{ParseScorerKindError, SCORE_DECIMALS, ScorerKind, round_score};
