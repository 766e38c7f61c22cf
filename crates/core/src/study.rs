//! Study zone: self-graded flashcards and mental-math tricks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{FlashCardId, Topic};

//
// ─── CONTENT ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashCard {
    pub id: FlashCardId,
    pub question: String,
    pub answer: String,
    pub topic: Topic,
    pub difficulty: u32,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub times_correct: u32,
    pub times_incorrect: u32,
}

impl FlashCard {
    fn builtin(id: u32, question: &str, answer: &str, topic: Topic, difficulty: u32) -> Self {
        Self {
            id: FlashCardId::new(id),
            question: question.to_owned(),
            answer: answer.to_owned(),
            topic,
            difficulty,
            last_reviewed: None,
            times_correct: 0,
            times_incorrect: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentalMathTrick {
    pub title: String,
    pub description: String,
    pub example: String,
    pub steps: Vec<String>,
    pub category: Topic,
}

impl MentalMathTrick {
    fn builtin(
        title: &str,
        description: &str,
        example: &str,
        steps: &[&str],
        category: Topic,
    ) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            example: example.to_owned(),
            steps: steps.iter().map(|step| (*step).to_owned()).collect(),
            category,
        }
    }
}

#[must_use]
pub fn builtin_flashcards() -> Vec<FlashCard> {
    vec![
        FlashCard::builtin(1, "7 × 8", "56", Topic::Multiplication, 1),
        FlashCard::builtin(2, "9 × 6", "54", Topic::Multiplication, 1),
        FlashCard::builtin(3, "12²", "144", Topic::Squares, 2),
        FlashCard::builtin(4, "15²", "225", Topic::Squares, 3),
        FlashCard::builtin(5, "3³", "27", Topic::Cubes, 1),
    ]
}

#[must_use]
pub fn builtin_tricks() -> Vec<MentalMathTrick> {
    vec![
        MentalMathTrick::builtin(
            "Multiply by 11",
            "Quick trick for multiplying any 2-digit number by 11",
            "23 × 11 = 253",
            &[
                "Take the two digits: 2 and 3",
                "Add them together: 2 + 3 = 5",
                "Place the sum between the digits: 2-5-3",
                "Result: 253",
            ],
            Topic::Multiplication,
        ),
        MentalMathTrick::builtin(
            "Square Numbers Ending in 5",
            "Fast way to square any number ending in 5",
            "25² = 625",
            &[
                "Take the first digit: 2",
                "Multiply by the next number: 2 × 3 = 6",
                "Append 25 to the result: 625",
                "Works for any number ending in 5!",
            ],
            Topic::Squares,
        ),
        MentalMathTrick::builtin(
            "Percentage of 100",
            "Quick percentage calculations",
            "15% of 200 = 30",
            &[
                "Move decimal point left by 2: 15% = 0.15",
                "Multiply: 0.15 × 200",
                "Or think: 15% = 15/100, so 15 × 2 = 30",
                "Result: 30",
            ],
            Topic::Percentages,
        ),
    ]
}

//
// ─── NAVIGATION ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudyTab {
    #[default]
    Flashcards,
    Tricks,
}

/// Browsing state for the study zone. Card and trick cursors wrap around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyZone {
    tab: StudyTab,
    cards: Vec<FlashCard>,
    tricks: Vec<MentalMathTrick>,
    card_index: usize,
    trick_index: usize,
    flipped: bool,
}

impl Default for StudyZone {
    fn default() -> Self {
        Self::new(builtin_flashcards(), builtin_tricks())
    }
}

impl StudyZone {
    #[must_use]
    pub fn new(cards: Vec<FlashCard>, tricks: Vec<MentalMathTrick>) -> Self {
        Self {
            tab: StudyTab::Flashcards,
            cards,
            tricks,
            card_index: 0,
            trick_index: 0,
            flipped: false,
        }
    }

    #[must_use]
    pub fn tab(&self) -> StudyTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: StudyTab) {
        self.tab = tab;
    }

    #[must_use]
    pub fn cards(&self) -> &[FlashCard] {
        &self.cards
    }

    #[must_use]
    pub fn card_index(&self) -> usize {
        self.card_index
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&FlashCard> {
        self.cards.get(self.card_index)
    }

    #[must_use]
    pub fn current_trick(&self) -> Option<&MentalMathTrick> {
        self.tricks.get(self.trick_index)
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn next_card(&mut self) {
        self.card_index = step(self.card_index, self.cards.len(), true);
        self.flipped = false;
    }

    pub fn prev_card(&mut self) {
        self.card_index = step(self.card_index, self.cards.len(), false);
        self.flipped = false;
    }

    pub fn next_trick(&mut self) {
        self.trick_index = step(self.trick_index, self.tricks.len(), true);
    }

    pub fn prev_trick(&mut self) {
        self.trick_index = step(self.trick_index, self.tricks.len(), false);
    }

    /// Records a self-graded answer on the current card.
    pub fn record_answer(&mut self, correct: bool, at: DateTime<Utc>) {
        let Some(card) = self.cards.get_mut(self.card_index) else {
            return;
        };
        if correct {
            card.times_correct += 1;
        } else {
            card.times_incorrect += 1;
        }
        card.last_reviewed = Some(at);
    }
}

fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
