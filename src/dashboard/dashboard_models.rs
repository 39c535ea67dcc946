use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FooterLink {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WidgetValue {
    Count(i64),
    Items(Vec<String>),
}

impl std::fmt::Display for WidgetValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetValue::Count(count) => write!(f, "{}", count),
            WidgetValue::Items(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WidgetState {
    Loading,
    Ready { value: WidgetValue },
    Error { message: String },
}

impl std::fmt::Display for WidgetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetState::Loading => write!(f, "…"),
            WidgetState::Ready { value } => write!(f, "{}", value),
            WidgetState::Error { .. } => write!(f, "Error"),
        }
    }
}

/// Everything a summary card needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetCard {
    pub title: &'static str,
    pub icon: &'static str,
    pub accent: &'static str,
    pub state: WidgetState,
    pub footer: Option<FooterLink>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_widget_state_display() {
        assert_eq!(WidgetState::Loading.to_string(), "…");
        assert_eq!(
            WidgetState::Ready {
                value: WidgetValue::Count(12)
            }
            .to_string(),
            "12"
        );
        assert_eq!(
            WidgetState::Ready {
                value: WidgetValue::Items(vec!["Catering".to_string(), "Decor".to_string()])
            }
            .to_string(),
            "Catering, Decor"
        );
        assert_eq!(
            WidgetState::Error {
                message: "storage offline".to_string()
            }
            .to_string(),
            "Error"
        );
    }

    #[test]
    fn test_widget_state_wire_format() {
        assert_eq!(
            serde_json::to_value(WidgetState::Ready {
                value: WidgetValue::Count(3)
            })
            .unwrap(),
            json!({"status": "ready", "value": 3})
        );
        assert_eq!(
            serde_json::to_value(WidgetState::Loading).unwrap(),
            json!({"status": "loading"})
        );
    }
}
