//! Booking question answers and answer-slot expansion.
//!
//! A question expands to zero or more concrete answer slots depending on its
//! scope and the current selection: per-person category questions expand to
//! one slot per participant, per-person extra questions to one slot per
//! selected unit. Validation and rendering share the same expansion so the
//! two can never disagree about which answers are required.

use serde::{Deserialize, Serialize};

use crate::booking::state::BookingState;
use crate::catalog::{BookingQuestion, QuestionScope};

/// A recorded answer value — free text or a checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Flag(bool),
}

impl AnswerValue {
    /// Whether this value counts as an answer: non-empty text or a ticked box.
    pub fn is_recorded(&self) -> bool {
        match self {
            Self::Text(text) => !text.trim().is_empty(),
            Self::Flag(flag) => *flag,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<bool> for AnswerValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

/// A stored answer with the participant slot it belongs to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub value: AnswerValue,
    /// `{categoryId}-{index}` or `extra-{index}` for per-person questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_slot: Option<String>,
}

/// Answer-map key for a question and an optional participant slot.
pub fn answer_key(question_id: &str, participant_slot: Option<&str>) -> String {
    match participant_slot {
        Some(slot) => format!("{question_id}-{slot}"),
        None => question_id.to_string(),
    }
}

/// Expand a question into the answer-map keys the current selection demands.
///
/// An empty result means the question does not apply to this selection at
/// all (nobody in an applicable category, no applicable extra chosen).
pub fn answer_slots(question: &BookingQuestion, state: &BookingState) -> Vec<String> {
    match question.scope() {
        QuestionScope::Booking => vec![question.id.clone()],

        QuestionScope::Category { applicable } => {
            if question.per_person {
                let mut keys = Vec::new();
                for category_id in applicable {
                    let count = state.participant_count(category_id);
                    for index in 0..count {
                        keys.push(answer_key(
                            &question.id,
                            Some(&format!("{category_id}-{index}")),
                        ));
                    }
                }
                keys
            } else {
                let applies = applicable
                    .iter()
                    .any(|category_id| state.participant_count(category_id) > 0);
                if applies {
                    vec![question.id.clone()]
                } else {
                    vec![]
                }
            }
        }

        QuestionScope::Extra { applicable } => {
            if question.per_person {
                let total_quantity: u32 = state
                    .extras
                    .iter()
                    .filter(|id| applicable.contains(id))
                    .map(|id| state.extra_quantity(id))
                    .sum();
                (0..total_quantity)
                    .map(|index| answer_key(&question.id, Some(&format!("extra-{index}"))))
                    .collect()
            } else {
                let applies = state.extras.iter().any(|id| applicable.contains(id));
                if applies {
                    vec![question.id.clone()]
                } else {
                    vec![]
                }
            }
        }
    }
}

/// Whether a question applies to the current selection at all.
pub fn applies(question: &BookingQuestion, state: &BookingState) -> bool {
    !answer_slots(question, state).is_empty()
}

/// Slots of a question that still lack a recorded answer.
pub fn unanswered_slots(question: &BookingQuestion, state: &BookingState) -> Vec<String> {
    answer_slots(question, state)
        .into_iter()
        .filter(|key| {
            !state
                .answers
                .get(key)
                .map(|a| a.value.is_recorded())
                .unwrap_or(false)
        })
        .collect()
}

/// Whether every required-before-checkout question applicable to the current
/// selection has all its slots answered.
pub fn checkout_questions_complete(state: &BookingState) -> bool {
    state
        .experience
        .checkout_questions()
        .all(|q| unanswered_slots(q, state).is_empty())
}

/// Questions to render on the questions step: those applicable to the
/// current selection, deduplicated by id in experience order.
pub fn applicable_questions<'a>(state: &'a BookingState) -> Vec<&'a BookingQuestion> {
    let mut seen = std::collections::HashSet::new();
    state
        .experience
        .booking_questions
        .iter()
        .filter(|q| applies(q, state))
        .filter(|q| seen.insert(q.id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::Experience;

    fn experience_with_questions() -> Arc<Experience> {
        Arc::new(
            serde_json::from_value(serde_json::json!({
                "_id": "exp-1",
                "name": "Rafting",
                "usedPricingCategories": [
                    { "category": { "_id": "cat-adult", "name": "Adult" }, "price": 50 },
                    { "category": { "_id": "cat-child", "name": "Child" }, "price": 25 }
                ],
                "bookingQuestions": [
                    {
                        "_id": "q-booking",
                        "question": "Anything we should know?",
                        "required": false,
                        "requiredStage": "beforeCheckout",
                        "type": "booking",
                        "perPerson": false,
                        "inputType": "textarea"
                    },
                    {
                        "_id": "q-child-age",
                        "question": "Child's exact age?",
                        "required": true,
                        "requiredStage": "beforeCheckout",
                        "type": "category",
                        "perPerson": true,
                        "inputType": "short_text",
                        "applicableCategories": ["cat-child"]
                    },
                    {
                        "_id": "q-helmet",
                        "question": "Helmet size?",
                        "required": true,
                        "requiredStage": "beforeCheckout",
                        "type": "extra",
                        "perPerson": true,
                        "inputType": "list",
                        "applicableExtras": ["extra-helmet"]
                    }
                ]
            }))
            .unwrap(),
        )
    }

    fn state() -> BookingState {
        BookingState::new(experience_with_questions(), Default::default())
    }

    #[test]
    fn booking_question_always_expands_to_one_slot() {
        let s = state();
        let q = &s.experience.booking_questions[0].clone();
        assert_eq!(answer_slots(q, &s), vec!["q-booking".to_string()]);
    }

    #[test]
    fn per_person_category_question_expands_per_participant() {
        let mut s = state();
        s.update_participants("cat-child", 2);
        let q = s.experience.booking_questions[1].clone();
        assert_eq!(
            answer_slots(&q, &s),
            vec![
                "q-child-age-cat-child-0".to_string(),
                "q-child-age-cat-child-1".to_string(),
            ]
        );

        // Nobody in the applicable category → question does not apply.
        let mut s = state();
        s.update_participants("cat-adult", 2);
        assert!(answer_slots(&q, &s).is_empty());
    }

    #[test]
    fn per_person_extra_question_expands_per_selected_unit() {
        let mut s = state();
        s.update_participants("cat-adult", 3);
        let q = s.experience.booking_questions[2].clone();
        assert!(answer_slots(&q, &s).is_empty());

        s.extras.push("extra-helmet".into());
        s.extra_quantities.insert("extra-helmet".into(), 3);
        assert_eq!(
            answer_slots(&q, &s),
            vec![
                "q-helmet-extra-0".to_string(),
                "q-helmet-extra-1".to_string(),
                "q-helmet-extra-2".to_string(),
            ]
        );
    }

    #[test]
    fn checkout_blocked_until_every_child_slot_is_answered() {
        let mut s = state();
        s.update_participants("cat-child", 2);
        assert!(!checkout_questions_complete(&s));

        s.set_answer("q-child-age", "7", Some("cat-child-0"));
        assert!(!checkout_questions_complete(&s));

        s.set_answer("q-child-age", "9", Some("cat-child-1"));
        assert!(checkout_questions_complete(&s));
    }

    #[test]
    fn blank_text_and_unticked_boxes_do_not_count() {
        assert!(!AnswerValue::Text("  ".into()).is_recorded());
        assert!(!AnswerValue::Flag(false).is_recorded());
        assert!(AnswerValue::Text("yes".into()).is_recorded());
        assert!(AnswerValue::Flag(true).is_recorded());
    }

    #[test]
    fn applicable_questions_filters_by_selection() {
        let mut s = state();
        s.update_participants("cat-adult", 1);
        let ids: Vec<&str> = applicable_questions(&s).iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q-booking"]);

        s.update_participants("cat-child", 1);
        let ids: Vec<&str> = applicable_questions(&s).iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q-booking", "q-child-age"]);
    }
}
