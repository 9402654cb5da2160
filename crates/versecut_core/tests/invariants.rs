//! Random edit sequences against a single track: after every step the track
//! is sorted, spaced, and free of short clips, and a rejected edit changes
//! nothing.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use versecut_core::{Clip, TimeMs, Track, MIN_CLIP_DURATION};

#[derive(Debug, Clone)]
enum Op {
    Insert { start: i64, len: i64 },
    Remove(usize),
    UpdateStart(usize, i64),
    UpdateEnd(usize, i64),
    Split(usize, i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0i64..20_000, 1i64..3_000).prop_map(|(start, len)| Op::Insert { start, len }),
        1 => any::<usize>().prop_map(Op::Remove),
        3 => (any::<usize>(), -1_500i64..1_500).prop_map(|(i, d)| Op::UpdateStart(i, d)),
        3 => (any::<usize>(), -1_500i64..1_500).prop_map(|(i, d)| Op::UpdateEnd(i, d)),
        2 => (any::<usize>(), 0i64..3_000).prop_map(|(i, d)| Op::Split(i, d)),
    ]
}

fn check_invariants(track: &Track) -> Result<(), TestCaseError> {
    for clip in track.clips() {
        prop_assert_eq!(clip.duration(), clip.end_time() - clip.start_time());
        prop_assert!(clip.duration() >= MIN_CLIP_DURATION, "short clip {:?}", clip);
        prop_assert!(clip.start_time() >= TimeMs::ZERO);
    }
    for pair in track.clips().windows(2) {
        prop_assert!(
            pair[0].end_time() < pair[1].start_time(),
            "{:?} touches {:?}",
            pair[0],
            pair[1]
        );
    }
    Ok(())
}

fn pick(track: &Track, i: usize) -> Option<&Clip> {
    if track.is_empty() {
        None
    } else {
        track.clips().get(i % track.len())
    }
}

proptest! {
    #[test]
    fn edits_never_break_track_invariants(ops in prop::collection::vec(op(), 1..80)) {
        let mut track = Track::subtitle("arabic");

        for op in ops {
            let before = track.clone();
            let result = match op {
                Op::Insert { start, len } => {
                    track.insert_clip(Clip::silence(TimeMs(start), TimeMs(start + len)))
                }
                Op::Remove(i) => match pick(&track, i).map(Clip::id) {
                    Some(id) => track.remove_clip(id).map(|_| ()),
                    None => continue,
                },
                Op::UpdateStart(i, delta) => match pick(&track, i).map(|c| (c.id(), c.start_time())) {
                    Some((id, start)) => track.update_clip_start(id, start + TimeMs(delta)),
                    None => continue,
                },
                Op::UpdateEnd(i, delta) => match pick(&track, i).map(|c| (c.id(), c.end_time())) {
                    Some((id, end)) => track.update_clip_end(id, end + TimeMs(delta)),
                    None => continue,
                },
                Op::Split(i, offset) => match pick(&track, i).map(|c| (c.id(), c.start_time())) {
                    Some((id, start)) => track.split_clip(id, start + TimeMs(offset)).map(|_| ()),
                    None => continue,
                },
            };

            if let Err(err) = result {
                prop_assert!(err.is_rejection(), "unexpected error {}", err);
                prop_assert_eq!(&track, &before);
            }
            check_invariants(&track)?;
        }
    }

    #[test]
    fn end_edit_couples_exactly_with_successor(
        split in 200i64..1_800,
        new_end in 0i64..2_100,
    ) {
        let mut track = Track::subtitle("arabic");
        let a = Clip::silence(TimeMs(0), TimeMs(split));
        let b = Clip::silence(TimeMs(split + 1), TimeMs(2_000));
        let (a_id, b_id) = (a.id(), b.id());
        track.insert_clip(a).unwrap();
        if track.insert_clip(b).is_err() {
            return Ok(());
        }

        let applied = track.update_clip_end(a_id, TimeMs(new_end)).is_ok();
        let a = track.clip(a_id).unwrap();
        let b = track.clip(b_id).unwrap();

        let expect_ok = new_end >= 100 && 2_000 - (new_end + 1) >= 100;
        prop_assert_eq!(applied, expect_ok);
        if applied {
            prop_assert_eq!(a.end_time(), TimeMs(new_end));
            prop_assert_eq!(b.start_time(), TimeMs(new_end + 1));
        } else {
            prop_assert_eq!(a.end_time(), TimeMs(split));
            prop_assert_eq!(b.start_time(), TimeMs(split + 1));
        }
    }
}
