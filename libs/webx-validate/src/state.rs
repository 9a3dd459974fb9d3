/// One structured validation diagnostic.
///
/// Wire-shaped: serializes to the error payload an HTTP layer can return
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Detail {
    pub domain: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Which input the diagnostic refers to, e.g. a field name.
    pub location: String,
    pub reason: String,
    pub message: String,
}

/// Accumulated validation diagnostics for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, thiserror::Error)]
#[error("validation failed in '{domain}': {} detail(s)", .details.len())]
pub struct ErrorState {
    pub domain: String,
    pub details: Vec<Detail>,
}

impl ErrorState {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            details: Vec::new(),
        }
    }

    pub fn add(&mut self, detail: Detail) {
        self.details.push(detail);
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_wire_payload() {
        let mut state = ErrorState::new("membership");
        state.add(Detail {
            domain: state.domain.clone(),
            kind: "field".to_string(),
            location: "email".to_string(),
            reason: "required".to_string(),
            message: "Required field cannot be left blank.".to_string(),
        });

        let payload = serde_json::to_value(&state).unwrap();
        assert_eq!(payload["domain"], "membership");
        assert_eq!(payload["details"][0]["type"], "field");
        assert_eq!(payload["details"][0]["location"], "email");
    }
}
