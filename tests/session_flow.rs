use chrono::{DateTime, TimeZone, Utc};
use mathquest::{
    GameStore, MemoryStore, ProceduralGenerator, Question, QuestionGenerator, Rules, Session,
    SessionError, SessionPhase,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 29, 10, 0, 0).unwrap()
}

/// Word questions with mixed-case answers
struct Capitals;

impl QuestionGenerator for Capitals {
    fn generate(&mut self, _topic_id: &str, count: usize) -> Vec<Question> {
        [("France", "paris"), ("Japan", "Tokyo"), ("Peru", "Lima")]
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, (country, city))| {
                Question::type_in(format!("cap-{i}"), format!("Capital of {country}?"), *city, None)
            })
            .collect()
    }
}

#[test]
fn perfect_run_with_procedural_questions() {
    let mut store = GameStore::new(MemoryStore::new(), Rules::default());
    let rules = store.rules().clone();
    let mut state = store.load(now());
    let mut generator = ProceduralGenerator::new(2024);

    let mut session = Session::start(&state, "exponents", &mut generator, &rules).unwrap();
    assert_eq!(session.questions().len(), 10);

    while let Some(question) = session.current_question().cloned() {
        let answered = session.submit(&state, &question.answer.to_uppercase(), now(), &rules).unwrap();
        assert!(answered.correct);
        state = answered.state;
        store.save(&state).unwrap();
        session.advance(&state);
    }

    assert_eq!(session.phase(), SessionPhase::Finished);
    assert!(session.is_perfect());
    assert_eq!(session.accuracy_percent(), 100);
    assert_eq!(session.xp_earned(), 100);
    assert_eq!(state.xp, 100);
    assert_eq!(state.level, 2);
    assert_eq!(state.topics["exponents"].crowns, 1);
    assert_eq!(state.streak, 10);
    assert_eq!(store.load(now()), state);
}

#[test]
fn newly_unlocked_topic_is_playable() {
    let rules = Rules::default();
    let store = GameStore::new(MemoryStore::new(), rules.clone());
    let mut state = store.load(now());
    let mut generator = ProceduralGenerator::new(1);
    assert!(!state.topics["fraction-basics"].unlocked);

    for _ in 0..2 {
        let mut session = Session::start(&state, "multiplication", &mut generator, &rules).unwrap();
        while let Some(question) = session.current_question().cloned() {
            state = session.submit(&state, &question.answer, now(), &rules).unwrap().state;
            session.advance(&state);
        }
    }
    assert_eq!(state.topics["multiplication"].crowns, 2);
    assert!(state.topics["fraction-basics"].unlocked);

    let mut session = Session::start(&state, "fraction-basics", &mut generator, &rules).unwrap();
    assert_eq!(session.questions().len(), 10);
    while let Some(question) = session.current_question().cloned() {
        state = session.submit(&state, &question.answer, now(), &rules).unwrap().state;
        session.advance(&state);
    }
    assert!(session.is_perfect());
    assert_eq!(state.topics["fraction-basics"].crowns, 1);
}

#[test]
fn answers_are_trimmed_and_case_insensitive() {
    let rules = Rules::default();
    let store = GameStore::new(MemoryStore::new(), rules.clone());
    let state = store.load(now());
    let mut session = Session::start(&state, "decimals", &mut Capitals, &rules).unwrap();

    let answered = session.submit(&state, " Paris ", now(), &rules).unwrap();
    assert!(answered.correct);
    session.advance(&answered.state);
    let answered = session.submit(&answered.state, "tokyo", now(), &rules).unwrap();
    assert!(answered.correct);
    assert_eq!(answered.state.topics["decimals"].correct_count, 2);
}

#[test]
fn running_out_of_hearts_ends_the_run_and_blocks_restart() {
    let rules = Rules::default();
    let store = GameStore::new(MemoryStore::new(), rules.clone());
    let mut state = store.load(now());
    let mut generator = ProceduralGenerator::new(9);
    let mut session = Session::start(&state, "division", &mut generator, &rules).unwrap();

    let mut answered_count = 0;
    while !session.is_finished() {
        state = session.submit(&state, "not a number", now(), &rules).unwrap().state;
        answered_count += 1;
        session.advance(&state);
    }

    assert_eq!(answered_count, 5);
    assert_eq!(state.hearts, 0);
    assert_eq!(session.wrong_in_session(), 5);
    assert_eq!(session.accuracy(), 0.0);
    assert!(!session.is_perfect());

    let err = Session::start(&state, "division", &mut generator, &rules).unwrap_err();
    assert_eq!(err, SessionError::OutOfHearts);
}
