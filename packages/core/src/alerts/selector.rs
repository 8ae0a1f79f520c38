use std::collections::HashSet;

use crate::document::{decode_documents, Document};
use crate::models::{collection, AlertItem};

/// Decode alert documents, skipping any that are malformed.
pub fn decode_alerts<I>(documents: I) -> Vec<AlertItem>
where
    I: IntoIterator<Item = Document>,
{
    decode_documents(collection::ALERTS, documents)
}

/// Pick the alert to show the user.
///
/// `candidates` must already be restricted to active alerts and ordered
/// newest first, which is what [`crate::services::AlertSource`] returns.
/// Acknowledged ids are dropped and the first remaining candidate wins.
pub fn select_newest_alert<I>(candidates: I, acknowledged: &HashSet<String>) -> Option<AlertItem>
where
    I: IntoIterator<Item = AlertItem>,
{
    candidates
        .into_iter()
        .find(|alert| !acknowledged.contains(&alert.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use serde_json::json;

    fn alert(id: &str, hours_ago: i64) -> AlertItem {
        AlertItem {
            id: id.to_string(),
            is_on: true,
            created_at: Utc.with_ymd_and_hms(2024, 12, 15, 12, 0, 0).unwrap()
                - Duration::hours(hours_ago),
            title: format!("Alert {}", id),
            message: "Something new".to_string(),
            action_text: None,
            alert_icon: None,
        }
    }

    fn acked(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn returns_none_for_no_candidates() {
        assert_eq!(select_newest_alert(Vec::new(), &acked(&[])), None);
    }

    #[test]
    fn picks_first_candidate_when_nothing_acknowledged() {
        let picked = select_newest_alert(vec![alert("a", 1), alert("b", 5)], &acked(&[]));
        assert_eq!(picked.map(|a| a.id), Some("a".to_string()));
    }

    #[test]
    fn skips_acknowledged_candidates() {
        let picked = select_newest_alert(
            vec![alert("a", 1), alert("b", 5), alert("c", 9)],
            &acked(&["a", "b"]),
        );
        assert_eq!(picked.map(|a| a.id), Some("c".to_string()));
    }

    #[test]
    fn returns_none_when_everything_is_acknowledged() {
        let picked = select_newest_alert(vec![alert("a", 1), alert("b", 2)], &acked(&["a", "b"]));
        assert_eq!(picked, None);
    }

    #[test]
    fn input_order_breaks_ties() {
        let picked = select_newest_alert(vec![alert("x", 3), alert("y", 3)], &acked(&[]));
        assert_eq!(picked.map(|a| a.id), Some("x".to_string()));
    }

    #[test]
    fn decode_alerts_drops_malformed_documents() {
        let good = serde_json::to_value(alert("ignored", 1)).unwrap();
        let docs = vec![
            Document::new("bad", json!({ "isOn": "yes" })),
            Document::new("good", good),
        ];

        let alerts = decode_alerts(docs);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "good");
    }

    #[test]
    fn malformed_first_document_does_not_hide_the_rest() {
        let good = serde_json::to_value(alert("ignored", 1)).unwrap();
        let docs = vec![Document::new("bad", json!(null)), Document::new("good", good)];

        let picked = select_newest_alert(decode_alerts(docs), &acked(&[]));
        assert_eq!(picked.map(|a| a.id), Some("good".to_string()));
    }

    fn id_strategy() -> impl Strategy<Value = String> {
        "[a-e]{1,2}"
    }

    proptest! {
        #[test]
        fn never_returns_an_acknowledged_alert(
            ids in prop::collection::vec(id_strategy(), 0..20),
            acknowledged in prop::collection::hash_set(id_strategy(), 0..10),
        ) {
            let candidates: Vec<_> = ids.iter().enumerate()
                .map(|(i, id)| alert(id, i as i64))
                .collect();

            if let Some(picked) = select_newest_alert(candidates.clone(), &acknowledged) {
                prop_assert!(!acknowledged.contains(&picked.id));
            } else {
                prop_assert!(candidates.iter().all(|c| acknowledged.contains(&c.id)));
            }
        }

        #[test]
        fn selection_is_idempotent(
            ids in prop::collection::vec(id_strategy(), 0..20),
            acknowledged in prop::collection::hash_set(id_strategy(), 0..10),
        ) {
            let candidates: Vec<_> = ids.iter().map(|id| alert(id, 0)).collect();
            prop_assert_eq!(
                select_newest_alert(candidates.clone(), &acknowledged),
                select_newest_alert(candidates, &acknowledged)
            );
        }
    }
}
