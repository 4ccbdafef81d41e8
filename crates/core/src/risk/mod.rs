//! Risk decision gate - external fraud scoring with fail-open semantics.

mod risk_client;
mod risk_errors;
mod risk_gate;
mod risk_model;


pub use risk_client::{HttpRiskClient, RiskScoringClientTrait};
pub use risk_errors::RiskError;
pub use risk_gate::{RiskDecisionGate, RiskGateConfig};
pub use risk_model::{
    ChallengeDescriptor, RiskAssessment, RiskDecision, RiskRequest, ScoreResponse,
};
