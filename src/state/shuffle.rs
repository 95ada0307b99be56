use rand::Rng;
use rand::seq::SliceRandom;

use crate::bank::{Category, Question};

/// Option order dealt for a single presentation of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledOptions {
    /// Option texts in dealt order.
    pub options: Vec<String>,
    /// Position of the correct option within `options`.
    pub correct_index: usize,
}

/// Copy a category's questions into a freshly shuffled order.
///
/// The source category is never mutated, so two sessions over the same
/// category draw independent orders. Categories with fewer than two
/// questions keep their order.
pub fn shuffle_questions<R>(category: &Category, rng: &mut R) -> Vec<Question>
where
    R: Rng + ?Sized,
{
    let mut questions = category.questions.clone();
    if questions.len() > 1 {
        questions.shuffle(rng);
    }
    questions
}

/// Deal a question's options in a fresh random order, tracking where the
/// correct one landed.
///
/// `options[correct_index]` is always the text the source question marks as
/// correct. Single-option questions come back unshuffled with index 0.
pub fn shuffle_options<R>(question: &Question, rng: &mut R) -> ShuffledOptions
where
    R: Rng + ?Sized,
{
    let mut order: Vec<usize> = (0..question.options.len()).collect();
    if order.len() > 1 {
        order.shuffle(rng);
    }

    let options = order
        .iter()
        .map(|&source| question.options[source].clone())
        .collect();
    let correct_index = order
        .iter()
        .position(|&source| source == question.correct_index)
        .expect("correct option survives the permutation");

    ShuffledOptions {
        options,
        correct_index,
    }
}
