pub mod compliance;
pub mod explanation;
pub mod findings;
pub mod report;
pub mod timeline;
pub mod types;

pub use compliance::{ClauseDetail, ComplianceResult, ImportanceTier, MissingClause, QualityCheck};
pub use explanation::{
    ComplianceExplanation, ContractTypeProfile, Explanations, RiskExplanation,
};
pub use findings::{
    AnalysisMethod, DetectionMethod, MissingSubjectFinding, Obligation, ObligationStrength,
    ObligationType, PartyBalance, PassiveVoiceFinding, ResponsibilityResult, RiskFinding,
    RiskReport, VagueTermFinding,
};
pub use report::{
    ChangeKind, ClauseChange, ClauseMatch, ComparisonResult, ContractAnalysis, DocumentSummary,
    MatchMethod, ModifiedClause, PowerShift, UnchangedClause, WordChange,
};
pub use timeline::{Entity, EntitySet, EventType, Timeline, TimelineEvent};
pub use types::{Clause, Language, Severity};
