//! Wire-format parsing and validation for the question bank document.
//!
//! The document is a JSON mapping with a `categories` list; each category
//! carries a `name` and a `questions` list of
//! `{question, options, correct_answer_index}` entries.

use indexmap::IndexMap;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use super::error::BankError;
use super::{Category, Question, QuestionBank};

#[derive(Debug, Deserialize)]
struct RawBank {
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize, Validate)]
struct RawCategory {
    #[validate(custom(function = not_blank))]
    name: String,
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize, Validate)]
struct RawQuestion {
    #[validate(custom(function = not_blank))]
    question: String,
    #[validate(
        length(min = 2, message = "a question needs at least two options"),
        custom(function = no_blank_options)
    )]
    options: Vec<String>,
    correct_answer_index: usize,
}

/// Parse and validate a bank document, failing on the first invalid entry.
pub(super) fn parse(bytes: &[u8]) -> Result<QuestionBank, BankError> {
    let raw: RawBank =
        serde_json::from_slice(bytes).map_err(|source| BankError::Parse { source })?;
    build(raw)
}

fn build(raw: RawBank) -> Result<QuestionBank, BankError> {
    let mut categories = IndexMap::with_capacity(raw.categories.len());

    for (position, raw_category) in raw.categories.into_iter().enumerate() {
        raw_category
            .validate()
            .map_err(|errors| BankError::InvalidCategory {
                number: position + 1,
                reason: flatten_errors(&errors),
            })?;

        if categories.contains_key(&raw_category.name) {
            return Err(BankError::DuplicateCategory {
                name: raw_category.name,
            });
        }

        let mut questions = Vec::with_capacity(raw_category.questions.len());
        for (question_position, raw_question) in raw_category.questions.into_iter().enumerate() {
            let number = question_position + 1;
            raw_question
                .validate()
                .map_err(|errors| BankError::InvalidQuestion {
                    category: raw_category.name.clone(),
                    number,
                    reason: flatten_errors(&errors),
                })?;

            if raw_question.correct_answer_index >= raw_question.options.len() {
                return Err(BankError::CorrectIndexOutOfRange {
                    category: raw_category.name.clone(),
                    number,
                    index: raw_question.correct_answer_index,
                    options: raw_question.options.len(),
                });
            }

            questions.push(Question {
                text: raw_question.question,
                options: raw_question.options,
                correct_index: raw_question.correct_answer_index,
            });
        }

        categories.insert(
            raw_category.name.clone(),
            Category {
                name: raw_category.name,
                questions,
            },
        );
    }

    Ok(QuestionBank { categories })
}

fn flatten_errors(errors: &ValidationErrors) -> String {
    errors.to_string().replace('\n', "; ")
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

fn no_blank_options(options: &[String]) -> Result<(), ValidationError> {
    if let Some(position) = options.iter().position(|option| option.trim().is_empty()) {
        let mut err = ValidationError::new("blank_option");
        err.message = Some(format!("option #{} is blank", position + 1).into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn bank(doc: serde_json::Value) -> Result<QuestionBank, BankError> {
        QuestionBank::from_slice(doc.to_string().as_bytes())
    }

    fn valid_doc() -> serde_json::Value {
        json!({
            "categories": [
                {
                    "name": "Science",
                    "questions": [
                        {
                            "question": "What planet is known as the Red Planet?",
                            "options": ["Venus", "Mars", "Jupiter", "Saturn"],
                            "correct_answer_index": 1
                        },
                        {
                            "question": "What gas do plants absorb?",
                            "options": ["Oxygen", "Carbon dioxide"],
                            "correct_answer_index": 1
                        }
                    ]
                },
                {
                    "name": "History",
                    "questions": [
                        {
                            "question": "In which year did World War II end?",
                            "options": ["1943", "1945", "1947"],
                            "correct_answer_index": 1
                        }
                    ]
                }
            ]
        })
    }

    #[test]
    fn valid_document_loads_with_order_preserved() {
        let loaded = bank(valid_doc()).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.total_questions(), 3);

        let names: Vec<_> = loaded.categories().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Science", "History"]);

        let science = loaded.category("Science").unwrap();
        assert_eq!(science.len(), 2);
        assert_eq!(science.questions[0].correct_index, 1);
        assert_eq!(science.questions[0].options[1], "Mars");

        assert_eq!(loaded.category_at(1).unwrap().name, "History");
        assert!(loaded.category_at(2).is_none());
        assert!(loaded.category("Sports").is_none());
    }

    #[test]
    fn empty_category_list_is_a_valid_degenerate_bank() {
        let loaded = bank(json!({ "categories": [] })).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.total_questions(), 0);
    }

    #[test]
    fn missing_categories_key_is_rejected() {
        let err = bank(json!({ "quizzes": [] })).unwrap_err();
        assert!(matches!(err, BankError::Parse { .. }));
    }

    #[test]
    fn non_mapping_document_is_rejected() {
        let err = QuestionBank::from_slice(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, BankError::Parse { .. }));
    }

    #[test]
    fn blank_category_name_is_rejected() {
        let err = bank(json!({
            "categories": [{ "name": "   ", "questions": [] }]
        }))
        .unwrap_err();
        assert!(matches!(err, BankError::InvalidCategory { number: 1, .. }));
    }

    #[test]
    fn duplicate_category_names_are_rejected() {
        let err = bank(json!({
            "categories": [
                { "name": "Science", "questions": [] },
                { "name": "Science", "questions": [] }
            ]
        }))
        .unwrap_err();
        assert!(matches!(err, BankError::DuplicateCategory { name } if name == "Science"));
    }

    #[test]
    fn blank_question_text_is_rejected() {
        let err = bank(json!({
            "categories": [{
                "name": "Science",
                "questions": [{
                    "question": "",
                    "options": ["Yes", "No"],
                    "correct_answer_index": 0
                }]
            }]
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            BankError::InvalidQuestion { number: 1, .. }
        ));
    }

    #[test]
    fn single_option_question_is_rejected() {
        let err = bank(json!({
            "categories": [{
                "name": "Science",
                "questions": [{
                    "question": "Is water wet?",
                    "options": ["Yes"],
                    "correct_answer_index": 0
                }]
            }]
        }))
        .unwrap_err();
        assert!(matches!(err, BankError::InvalidQuestion { .. }));
    }

    #[test]
    fn blank_option_text_is_rejected() {
        let err = bank(json!({
            "categories": [{
                "name": "Science",
                "questions": [{
                    "question": "Is water wet?",
                    "options": ["Yes", " "],
                    "correct_answer_index": 0
                }]
            }]
        }))
        .unwrap_err();
        assert!(matches!(err, BankError::InvalidQuestion { .. }));
    }

    #[test]
    fn correct_index_equal_to_option_count_is_rejected() {
        let err = bank(json!({
            "categories": [{
                "name": "Science",
                "questions": [{
                    "question": "Is water wet?",
                    "options": ["Yes", "No"],
                    "correct_answer_index": 2
                }]
            }]
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            BankError::CorrectIndexOutOfRange {
                number: 1,
                index: 2,
                options: 2,
                ..
            }
        ));
    }

    #[test]
    fn second_question_position_is_reported() {
        let err = bank(json!({
            "categories": [{
                "name": "Science",
                "questions": [
                    {
                        "question": "Is water wet?",
                        "options": ["Yes", "No"],
                        "correct_answer_index": 0
                    },
                    {
                        "question": "Is fire cold?",
                        "options": ["Yes", "No"],
                        "correct_answer_index": 5
                    }
                ]
            }]
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            BankError::CorrectIndexOutOfRange { number: 2, index: 5, .. }
        ));
    }

    #[test]
    fn failed_load_retains_nothing() {
        let broken = json!({
            "categories": [{
                "name": "Science",
                "questions": [{
                    "question": "Is water wet?",
                    "options": ["Yes", "No"],
                    "correct_answer_index": 9
                }]
            }]
        });
        assert!(bank(broken).is_err());

        // The same loader call over a fixed document succeeds untainted.
        let loaded = bank(valid_doc()).unwrap();
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn not_blank_accepts_text_and_rejects_whitespace() {
        assert!(not_blank("Science").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }

    #[test]
    fn no_blank_options_reports_the_position() {
        assert!(no_blank_options(&["Yes".into(), "No".into()]).is_ok());
        let err = no_blank_options(&["Yes".into(), "".into()]).unwrap_err();
        assert_eq!(err.code, "blank_option");
    }
}
