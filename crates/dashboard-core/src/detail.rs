//! Contract detail view model
//!
//! Read-only presentation of one contract: header, clauses, insights, and an
//! evidence panel that starts hidden and is toggled by the user.

use contract_types::{Contract, ContractStatus, RiskLevel};
use serde::Serialize;

use crate::catalog::ContractCatalog;
use crate::display::{format_date_long, percent, risk_tone, status_tone, Tone};
use crate::error::Result;

pub const NO_CLAUSES_MESSAGE: &str = "No clauses available for this contract.";
pub const NO_INSIGHTS_MESSAGE: &str = "No AI insights available for this contract.";
pub const NOT_FOUND_MESSAGE: &str = "Contract not found";

#[derive(Debug, Clone)]
pub struct ContractDetail {
    contract: Contract,
    evidence_visible: bool,
}

impl ContractDetail {
    pub fn new(contract: Contract) -> Self {
        Self {
            contract,
            evidence_visible: false,
        }
    }

    /// Look up `id` in the catalog. Missing ids are `DashboardError::NotFound`.
    pub fn from_catalog(catalog: &ContractCatalog, id: &str) -> Result<Self> {
        catalog.find(id).cloned().map(Self::new)
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub fn evidence_visible(&self) -> bool {
        self.evidence_visible
    }

    /// Flip the evidence panel, returning the new visibility
    pub fn toggle_evidence(&mut self) -> bool {
        self.evidence_visible = !self.evidence_visible;
        self.evidence_visible
    }

    pub fn render(&self) -> DetailModel {
        let c = &self.contract;

        let clauses: Vec<ClauseRow> = c
            .clauses()
            .iter()
            .map(|clause| ClauseRow {
                title: clause.title.clone(),
                summary: clause.summary.clone(),
                confidence_percent: percent(clause.confidence),
            })
            .collect();

        let insights: Vec<InsightRow> = c
            .insights()
            .iter()
            .map(|insight| InsightRow {
                risk: insight.risk,
                label: format!("{} Risk", insight.risk),
                tone: risk_tone(insight.risk),
                message: insight.message.clone(),
            })
            .collect();

        // Shown only while the panel is open and the record has evidence
        let evidence = match (&c.evidence, self.evidence_visible) {
            (Some(items), true) => Some(
                items
                    .iter()
                    .map(|e| EvidenceRow {
                        source: e.source.clone(),
                        snippet: e.snippet.clone(),
                        relevance_percent: percent(e.relevance),
                    })
                    .collect(),
            ),
            _ => None,
        };

        DetailModel {
            id: c.id.clone(),
            name: c.name.clone(),
            parties: c.parties.clone(),
            start: c.start.map(format_date_long),
            expiry: format_date_long(c.expiry),
            status: c.status,
            status_tone: status_tone(c.status),
            risk: c.risk,
            risk_tone: risk_tone(c.risk),
            clauses_placeholder: clauses.is_empty().then_some(NO_CLAUSES_MESSAGE),
            clauses,
            insights_placeholder: insights.is_empty().then_some(NO_INSIGHTS_MESSAGE),
            insights,
            evidence_visible: self.evidence_visible,
            evidence,
        }
    }
}

/// Everything the detail page renders, already formatted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailModel {
    pub id: String,
    pub name: String,
    pub parties: String,
    /// Present only when the contract has a start date
    pub start: Option<String>,
    pub expiry: String,
    pub status: ContractStatus,
    pub status_tone: Tone,
    pub risk: RiskLevel,
    pub risk_tone: Tone,
    pub clauses: Vec<ClauseRow>,
    pub clauses_placeholder: Option<&'static str>,
    pub insights: Vec<InsightRow>,
    pub insights_placeholder: Option<&'static str>,
    pub evidence_visible: bool,
    pub evidence: Option<Vec<EvidenceRow>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseRow {
    pub title: String,
    pub summary: String,
    pub confidence_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightRow {
    pub risk: RiskLevel,
    pub label: String,
    pub tone: Tone,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceRow {
    pub source: String,
    pub snippet: String,
    pub relevance_percent: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"[
        {
            "id": "c-001",
            "name": "Acme Corp Master Agreement",
            "parties": "Acme Corp, Beta LLC",
            "start": "2023-01-15",
            "expiry": "2025-01-14",
            "status": "Active",
            "risk": "High",
            "clauses": [
                {"title": "Termination", "summary": "Either party, 90 days notice", "confidence": 0.92}
            ],
            "insights": [
                {"risk": "High", "message": "Liability cap is missing"}
            ],
            "evidence": [
                {"source": "Section 12.1", "snippet": "liability shall not be limited", "relevance": 0.876}
            ]
        },
        {
            "id": "c-002",
            "name": "Bare Lease",
            "parties": "Gamma Inc",
            "expiry": "2024-06-30",
            "status": "Expired",
            "risk": "Low"
        }
    ]"#;

    fn catalog() -> ContractCatalog {
        ContractCatalog::from_json(DOC).unwrap()
    }

    #[test]
    fn test_full_record_renders_formatted_fields() {
        let detail = ContractDetail::from_catalog(&catalog(), "c-001").unwrap();
        let model = detail.render();

        assert_eq!(model.start.as_deref(), Some("January 15, 2023"));
        assert_eq!(model.expiry, "January 14, 2025");
        assert_eq!(
            model.clauses,
            vec![ClauseRow {
                title: "Termination".to_string(),
                summary: "Either party, 90 days notice".to_string(),
                confidence_percent: 92,
            }]
        );
        assert_eq!(model.clauses_placeholder, None);
        assert_eq!(model.insights[0].label, "High Risk");
        assert_eq!(model.insights[0].tone, Tone::Negative);
    }

    #[test]
    fn test_evidence_hidden_until_toggled() {
        let mut detail = ContractDetail::from_catalog(&catalog(), "c-001").unwrap();
        assert!(!detail.evidence_visible());
        assert_eq!(detail.render().evidence, None);

        assert!(detail.toggle_evidence());
        let evidence = detail.render().evidence.unwrap();
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].relevance_percent, 88);

        assert!(!detail.toggle_evidence());
        assert_eq!(detail.render().evidence, None);
    }

    #[test]
    fn test_missing_annotations_use_placeholders() {
        let mut detail = ContractDetail::from_catalog(&catalog(), "c-002").unwrap();
        detail.toggle_evidence();
        let model = detail.render();

        assert_eq!(model.start, None);
        assert!(model.clauses.is_empty());
        assert_eq!(model.clauses_placeholder, Some(NO_CLAUSES_MESSAGE));
        assert_eq!(model.insights_placeholder, Some(NO_INSIGHTS_MESSAGE));
        // Panel open, but there is nothing to show
        assert!(model.evidence_visible);
        assert_eq!(model.evidence, None);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let err = ContractDetail::from_catalog(&catalog(), "c-404").unwrap_err();
        assert!(matches!(err, DashboardError::NotFound(_)));
    }
}
