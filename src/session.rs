//! Quiz-run orchestration.
//!
//! A [`Session`] is the ephemeral state of one run through a topic. It is
//! never persisted; every answer is pushed into the [`GameState`] through
//! the pure progression transitions and the caller saves the result.

use chrono::{DateTime, Utc};

use crate::error::SessionError;
use crate::progression;
use crate::question::{Question, QuestionGenerator};
use crate::rules::Rules;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Playing { index: usize },
    Finished,
}

/// Outcome of a submitted answer
#[derive(Debug, Clone, PartialEq)]
pub struct Answered {
    pub correct: bool,
    /// Game state after recording the answer (and XP, when correct)
    pub state: GameState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    topic_id: String,
    questions: Vec<Question>,
    current_index: usize,
    correct_in_session: u32,
    wrong_in_session: u32,
    xp_earned: u32,
    selected_answer: Option<String>,
    is_correct: Option<bool>,
    show_result: bool,
    finished: bool,
    /// Consecutive correct answers within this run only
    session_streak: u32,
}

impl Session {
    /// Draw questions and begin a run. Refuses when the player has no hearts.
    pub fn start<G: QuestionGenerator + ?Sized>(
        state: &GameState,
        topic_id: &str,
        generator: &mut G,
        rules: &Rules,
    ) -> Result<Self, SessionError> {
        if !state.has_hearts() {
            log::info!("[SESSION] refused topic:{} hearts:0", topic_id);
            return Err(SessionError::OutOfHearts);
        }

        let questions = generator.generate(topic_id, rules.questions_per_session);
        if questions.is_empty() {
            return Err(SessionError::NoQuestions(topic_id.to_string()));
        }

        log::info!("[SESSION] start topic:{} questions:{}", topic_id, questions.len());
        Ok(Self {
            topic_id: topic_id.to_string(),
            questions,
            current_index: 0,
            correct_in_session: 0,
            wrong_in_session: 0,
            xp_earned: 0,
            selected_answer: None,
            is_correct: None,
            show_result: false,
            finished: false,
            session_streak: 0,
        })
    }

    // -------------------- Accessors --------------------

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.finished {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn correct_in_session(&self) -> u32 {
        self.correct_in_session
    }

    pub fn wrong_in_session(&self) -> u32 {
        self.wrong_in_session
    }

    pub fn xp_earned(&self) -> u32 {
        self.xp_earned
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    /// Result of the current question once submitted
    pub fn is_correct(&self) -> Option<bool> {
        self.is_correct
    }

    pub fn show_result(&self) -> bool {
        self.show_result
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn session_streak(&self) -> u32 {
        self.session_streak
    }

    pub fn phase(&self) -> SessionPhase {
        if self.finished {
            SessionPhase::Finished
        } else {
            SessionPhase::Playing { index: self.current_index }
        }
    }

    // -------------------- Transitions --------------------

    /// Check an answer for the current question and record it.
    ///
    /// Returns None (and changes nothing) when the question was already
    /// answered or the run is over.
    pub fn submit(
        &mut self,
        state: &GameState,
        answer: &str,
        now: DateTime<Utc>,
        rules: &Rules,
    ) -> Option<Answered> {
        if self.show_result || self.finished {
            return None;
        }
        let question = self.questions.get(self.current_index)?;
        let correct = question.is_correct(answer);

        let mut next = progression::record_answer(state, &self.topic_id, correct, now, rules);
        if correct {
            next = progression::add_xp(&next, rules.xp_per_correct, now);
            self.correct_in_session += 1;
            self.xp_earned += rules.xp_per_correct;
            self.session_streak += 1;
        } else {
            self.wrong_in_session += 1;
            self.session_streak = 0;
        }

        self.selected_answer = Some(answer.to_string());
        self.is_correct = Some(correct);
        self.show_result = true;

        Some(Answered { correct, state: next })
    }

    /// Move past the current question. Ends the run on the last question or
    /// as soon as the player is out of hearts.
    pub fn advance(&mut self, state: &GameState) -> SessionPhase {
        if self.finished {
            return SessionPhase::Finished;
        }

        let next_index = self.current_index + 1;
        if !state.has_hearts() || next_index >= self.questions.len() {
            self.finished = true;
            log::info!(
                "[SESSION] finished topic:{} correct:{} wrong:{} xp:{} hearts:{}",
                self.topic_id, self.correct_in_session, self.wrong_in_session, self.xp_earned, state.hearts
            );
            return SessionPhase::Finished;
        }

        self.current_index = next_index;
        self.selected_answer = None;
        self.is_correct = None;
        self.show_result = false;
        self.phase()
    }

    // -------------------- Results --------------------

    /// Correct share of answered questions, 0.0 when nothing was answered
    pub fn accuracy(&self) -> f64 {
        let answered = self.correct_in_session + self.wrong_in_session;
        if answered == 0 {
            0.0
        } else {
            f64::from(self.correct_in_session) / f64::from(answered)
        }
    }

    /// Accuracy as a rounded whole percentage
    pub fn accuracy_percent(&self) -> u32 {
        (self.accuracy() * 100.0).round() as u32
    }

    /// At least one correct answer and no wrong ones
    pub fn is_perfect(&self) -> bool {
        self.wrong_in_session == 0 && self.correct_in_session > 0
    }

    /// Fraction of the run answered so far
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        let answered = self.current_index + usize::from(self.show_result);
        answered as f64 / self.questions.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Serves `n` type-in questions whose answer is their position
    struct Fixed(usize);

    impl QuestionGenerator for Fixed {
        fn generate(&mut self, _topic_id: &str, count: usize) -> Vec<Question> {
            (0..self.0.min(count))
                .map(|i| Question::type_in(format!("q-{i}"), format!("Say {i}"), i.to_string(), None))
                .collect()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_start_refuses_without_hearts() {
        let rules = Rules::default();
        let mut state = GameState::new(now(), &rules);
        state.hearts = 0;
        let err = Session::start(&state, "multiplication", &mut Fixed(10), &rules).unwrap_err();
        assert_eq!(err, SessionError::OutOfHearts);
    }

    #[test]
    fn test_start_refuses_empty_bank() {
        let rules = Rules::default();
        let state = GameState::new(now(), &rules);
        let err = Session::start(&state, "volume", &mut Fixed(0), &rules).unwrap_err();
        assert_eq!(err, SessionError::NoQuestions("volume".to_string()));
    }

    #[test]
    fn test_second_submit_ignored() {
        let rules = Rules::default();
        let state = GameState::new(now(), &rules);
        let mut session = Session::start(&state, "multiplication", &mut Fixed(10), &rules).unwrap();

        let answered = session.submit(&state, " 0 ", now(), &rules).unwrap();
        assert!(answered.correct);
        assert_eq!(answered.state.xp, 10);
        assert_eq!(answered.state.topics["multiplication"].correct_count, 1);

        assert!(session.submit(&answered.state, "0", now(), &rules).is_none());
        assert_eq!(session.correct_in_session(), 1);
        assert_eq!(session.xp_earned(), 10);
        assert_eq!(session.selected_answer(), Some(" 0 "));
    }

    #[test]
    fn test_wrong_answer_no_xp() {
        let rules = Rules::default();
        let state = GameState::new(now(), &rules);
        let mut session = Session::start(&state, "division", &mut Fixed(10), &rules).unwrap();

        let answered = session.submit(&state, "7", now(), &rules).unwrap();
        assert!(!answered.correct);
        assert_eq!(answered.state.xp, 0);
        assert_eq!(answered.state.hearts, 4);
        assert_eq!(session.is_correct(), Some(false));
        assert_eq!(session.wrong_in_session(), 1);
    }

    #[test]
    fn test_advance_clears_result_flags() {
        let rules = Rules::default();
        let state = GameState::new(now(), &rules);
        let mut session = Session::start(&state, "division", &mut Fixed(3), &rules).unwrap();
        let answered = session.submit(&state, "0", now(), &rules).unwrap();
        assert!((session.progress() - 1.0 / 3.0).abs() < 1e-9);

        assert_eq!(session.advance(&answered.state), SessionPhase::Playing { index: 1 });
        assert!(!session.show_result());
        assert_eq!(session.selected_answer(), None);
        assert_eq!(session.is_correct(), None);
        assert_eq!(session.current_question().map(|q| q.id.as_str()), Some("q-1"));
    }

    #[test]
    fn test_out_of_hearts_finishes_early() {
        let rules = Rules::default();
        let mut state = GameState::new(now(), &rules);
        state.hearts = 1;
        let mut session = Session::start(&state, "division", &mut Fixed(10), &rules).unwrap();

        let answered = session.submit(&state, "wrong", now(), &rules).unwrap();
        assert_eq!(answered.state.hearts, 0);
        assert_eq!(session.advance(&answered.state), SessionPhase::Finished);
        assert!(session.is_finished());
        assert!(session.current_question().is_none());
        assert!(session.submit(&answered.state, "1", now(), &rules).is_none());
    }

    #[test]
    fn test_results() {
        let rules = Rules::default();
        let mut state = GameState::new(now(), &rules);
        let mut session = Session::start(&state, "integers", &mut Fixed(3), &rules).unwrap();
        assert_eq!(session.accuracy(), 0.0);
        assert!(!session.is_perfect());

        for answer in ["0", "1", "x"] {
            state = session.submit(&state, answer, now(), &rules).unwrap().state;
            session.advance(&state);
        }
        assert!(session.is_finished());
        assert_eq!(session.accuracy_percent(), 67);
        assert!(!session.is_perfect());
        assert_eq!(session.session_streak(), 0);
        assert_eq!(state.streak, 0);
        assert_eq!(state.longest_streak, 2);
    }
}
