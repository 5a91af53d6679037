use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::timer::mock::ManualScheduler;

/// Owned copy of an emitted snapshot, kept so assertions can outlive the
/// borrow handed to the observer.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Record {
    word: String,
    index: usize,
    total: usize,
    percentage: u8,
    time_remaining: String,
    words_remaining: usize,
    playing: bool,
}

impl Record {
    fn of(snapshot: &StateSnapshot<'_>) -> Self {
        Self {
            word: snapshot.current_word.to_string(),
            index: snapshot.current_index,
            total: snapshot.total_words,
            percentage: snapshot.percentage,
            time_remaining: snapshot.time_remaining.to_string(),
            words_remaining: snapshot.words_remaining,
            playing: snapshot.is_playing,
        }
    }
}

struct RecordingObserver(Rc<RefCell<Vec<Record>>>);

impl StateObserver for RecordingObserver {
    fn on_state_change(&mut self, snapshot: &StateSnapshot<'_>) {
        self.0.borrow_mut().push(Record::of(snapshot));
    }
}

type TestEngine = RsvpEngine<ManualScheduler, RecordingObserver>;

fn make_engine(settings: ReaderSettings) -> (TestEngine, Rc<RefCell<Vec<Record>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let engine = RsvpEngine::new(
        ManualScheduler::new(),
        RecordingObserver(Rc::clone(&log)),
        settings,
    );
    (engine, log)
}

fn last(log: &Rc<RefCell<Vec<Record>>>) -> Record {
    log.borrow().last().cloned().expect("no snapshot emitted")
}

#[test]
fn load_content_counts_maximal_whitespace_runs() {
    let (mut engine, log) = make_engine(ReaderSettings::default());

    engine.load_content("  one\r\ntwo\tthree  ");

    let snapshot = last(&log);
    assert_eq!(snapshot.total, 3);
    assert_eq!(snapshot.index, 0);
    assert_eq!(snapshot.word, "one");
    assert!(!snapshot.playing);
    assert_eq!(engine.state().total_words, 3);
}

#[test]
fn load_content_cancels_running_playback() {
    let (mut engine, log) = make_engine(ReaderSettings::default());
    engine.load_content("uno dos tres");
    engine.play();
    assert!(engine.scheduler.is_armed());

    engine.load_content("nuevo texto");

    assert!(!engine.scheduler.is_armed());
    let snapshot = last(&log);
    assert!(!snapshot.playing);
    assert_eq!(snapshot.index, 0);
    assert_eq!(snapshot.total, 2);
}

#[test]
fn set_wpm_clamps_to_supported_range() {
    let (mut engine, _log) = make_engine(ReaderSettings::default());

    engine.set_wpm(50);
    assert_eq!(engine.wpm(), WPM_MIN);
    engine.set_wpm(5000);
    assert_eq!(engine.wpm(), WPM_MAX);
    engine.set_wpm(400);
    assert_eq!(engine.wpm(), 400);
}

#[test]
fn jump_to_clamps_to_valid_range() {
    let (mut engine, log) = make_engine(ReaderSettings::default());
    engine.load_content("w0 w1 w2");

    engine.jump_to(10);
    assert_eq!(last(&log).index, 2);
    engine.jump_to(0);
    assert_eq!(last(&log).index, 0);
    engine.skip(100);
    assert_eq!(last(&log).index, 2);
    engine.rewind(100);
    assert_eq!(last(&log).index, 0);
}

#[test]
fn jump_to_on_empty_sequence_stays_at_zero() {
    let (mut engine, _log) = make_engine(ReaderSettings::default());

    engine.jump_to(7);

    let snapshot = engine.state();
    assert_eq!(snapshot.current_index, 0);
    assert_eq!(snapshot.total_words, 0);
    assert_eq!(snapshot.percentage, 0);
    assert_eq!(snapshot.current_word, "");
}

#[test]
fn play_on_empty_sequence_is_a_silent_noop() {
    let (mut engine, log) = make_engine(ReaderSettings::default());

    engine.play();

    assert!(log.borrow().is_empty());
    assert!(!engine.is_playing());
    assert!(!engine.scheduler.is_armed());
}

#[test]
fn play_arms_the_current_word_delay() {
    let (mut engine, log) = make_engine(ReaderSettings::default());
    engine.load_content("hello world");

    engine.play();

    // 60_000 / 300 wpm, no punctuation or length weight.
    assert_eq!(engine.scheduler.armed_delay_ms(), Some(200));
    let snapshot = last(&log);
    assert!(snapshot.playing);
    assert_eq!(snapshot.index, 0);
}

#[test]
fn playing_to_completion_pauses_past_the_last_word() {
    let (mut engine, log) = make_engine(ReaderSettings::default());
    engine.load_content("a b c");
    engine.set_wpm(1000);
    engine.play();
    assert_eq!(engine.scheduler.armed_delay_ms(), Some(60));

    while engine.scheduler.fire().is_some() {
        engine.tick();
    }

    let snapshot = last(&log);
    assert!(!snapshot.playing);
    assert_eq!(snapshot.index, 3);
    assert_eq!(snapshot.percentage, 100);
    assert_eq!(snapshot.words_remaining, 0);
    assert_eq!(snapshot.word, "");
    assert_eq!(snapshot.time_remaining, "0s");
    assert!(!engine.scheduler.is_armed());
}

#[test]
fn play_after_completion_wraps_to_the_start() {
    let (mut engine, log) = make_engine(ReaderSettings::default());
    engine.load_content("a b c");
    engine.play();
    while engine.scheduler.fire().is_some() {
        engine.tick();
    }
    assert_eq!(engine.current_index(), 3);

    engine.play();

    let snapshot = last(&log);
    assert!(snapshot.playing);
    assert_eq!(snapshot.index, 0);
    assert_eq!(snapshot.word, "a");
}

#[test]
fn long_word_and_sentence_punctuation_stack_additively() {
    let (mut engine, _log) = make_engine(ReaderSettings::default());
    engine.load_content("antidisestablishmentarianism. next");

    engine.play();

    // 200ms * (1 + 0.2 + 0.5)
    assert_eq!(engine.scheduler.armed_delay_ms(), Some(340));
}

#[test]
fn clause_punctuation_uses_the_clause_weight() {
    let (mut engine, _log) = make_engine(ReaderSettings::default());
    engine.load_content("however, next");

    engine.play();

    // 200ms * (1 + 0.25); "however," has exactly 8 chars, no length weight.
    assert_eq!(engine.scheduler.armed_delay_ms(), Some(250));
}

#[test]
fn long_word_alone_gets_the_length_weight() {
    let (mut engine, _log) = make_engine(ReaderSettings::default());
    engine.load_content("wonderful next");

    engine.play();

    // 200ms * 1.2
    assert_eq!(engine.scheduler.armed_delay_ms(), Some(240));
}

#[test]
fn tuned_sentence_weight_applies_when_natural_reading_is_on() {
    let settings = ReaderSettings {
        sentence_delay: 0.9,
        ..ReaderSettings::default()
    };
    let (mut engine, _log) = make_engine(settings);
    engine.load_content("antidisestablishmentarianism. next");

    engine.play();

    // 200ms * (1 + 0.2 + 0.9)
    assert_eq!(engine.scheduler.armed_delay_ms(), Some(420));
}

#[test]
fn disabling_natural_reading_falls_back_to_fixed_weights() {
    let settings = ReaderSettings {
        natural_reading_enabled: false,
        sentence_delay: 0.9,
        clause_delay: 0.8,
        ..ReaderSettings::default()
    };
    let (mut engine, _log) = make_engine(settings);
    engine.load_content("antidisestablishmentarianism. next");

    engine.play();

    // Tunables are ignored but the pause survives: 200ms * (1 + 0.2 + 0.5).
    assert_eq!(engine.scheduler.armed_delay_ms(), Some(340));
}

#[test]
fn pause_twice_emits_identical_snapshots_and_disarms_once() {
    let (mut engine, log) = make_engine(ReaderSettings::default());
    engine.load_content("uno dos tres");
    engine.play();

    engine.pause();
    engine.pause();

    let records = log.borrow();
    let n = records.len();
    assert_eq!(records[n - 1], records[n - 2]);
    assert!(!records[n - 1].playing);
    drop(records);
    assert_eq!(engine.scheduler.cancel_count(), 1);
}

#[test]
fn stop_resets_position_even_before_first_play() {
    let (mut engine, log) = make_engine(ReaderSettings::default());
    engine.load_content("uno dos tres");
    engine.jump_to(2);

    engine.stop();

    let snapshot = last(&log);
    assert_eq!(snapshot.index, 0);
    assert!(!snapshot.playing);
}

#[test]
fn skip_during_playback_reschedules_for_the_new_word() {
    let (mut engine, log) = make_engine(ReaderSettings::default());
    engine.load_content("hi antidisestablishmentarianism. done");
    engine.play();
    assert_eq!(engine.scheduler.armed_delay_ms(), Some(200));

    engine.skip(1);

    assert_eq!(engine.scheduler.armed_delay_ms(), Some(340));
    let snapshot = last(&log);
    assert!(snapshot.playing);
    assert_eq!(snapshot.index, 1);
}

#[test]
fn set_wpm_leaves_the_inflight_delay_untouched() {
    let (mut engine, _log) = make_engine(ReaderSettings::default());
    engine.load_content("aa bb");
    engine.play();
    assert_eq!(engine.scheduler.armed_delay_ms(), Some(200));

    engine.set_wpm(1000);

    assert_eq!(engine.scheduler.armed_delay_ms(), Some(200));
    engine.scheduler.fire();
    engine.tick();
    assert_eq!(engine.scheduler.armed_delay_ms(), Some(60));
}

#[test]
fn apply_settings_patches_only_present_fields() {
    let (mut engine, _log) = make_engine(ReaderSettings::default());
    engine.load_content("antidisestablishmentarianism. next");

    engine.apply_settings(SettingsPatch {
        wpm: Some(2000),
        sentence_delay: Some(1.0),
        ..SettingsPatch::default()
    });

    assert_eq!(engine.wpm(), WPM_MAX);
    engine.play();
    // 60ms * (1 + 0.2 + 1.0)
    assert_eq!(engine.scheduler.armed_delay_ms(), Some(132));
}

#[test]
fn state_is_a_pure_read() {
    let (mut engine, log) = make_engine(ReaderSettings::default());
    engine.load_content("w0 w1 w2");
    engine.jump_to(1);
    let emitted = log.borrow().len();

    let snapshot = Record::of(&engine.state());

    assert_eq!(snapshot, last(&log));
    assert_eq!(log.borrow().len(), emitted);
}

#[test]
fn percentage_rounds_to_nearest_whole() {
    let (mut engine, log) = make_engine(ReaderSettings::default());
    engine.load_content("w0 w1 w2");

    engine.jump_to(1);
    assert_eq!(last(&log).percentage, 33);
    engine.jump_to(2);
    assert_eq!(last(&log).percentage, 67);
}

#[test]
fn time_remaining_reflects_words_left_at_current_rate() {
    let (mut engine, _log) = make_engine(ReaderSettings::default());

    engine.load_content("a b c d e");
    assert_eq!(engine.state().time_remaining, "1s");

    let long_text = "word ".repeat(900);
    engine.load_content(&long_text);
    assert_eq!(engine.state().time_remaining, "3m 0s");
}

#[test]
fn destroy_silences_and_disarms_the_engine() {
    let (mut engine, log) = make_engine(ReaderSettings::default());
    engine.load_content("uno dos tres");
    engine.play();
    assert!(engine.scheduler.is_armed());

    engine.destroy();
    let emitted = log.borrow().len();

    assert!(!engine.scheduler.is_armed());
    engine.play();
    engine.pause();
    engine.tick();
    engine.destroy();
    assert_eq!(log.borrow().len(), emitted);
}
