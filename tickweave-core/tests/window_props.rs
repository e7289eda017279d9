use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use tickweave_core::{BackwardWindows, DateWindow, TickweaveError, WindowSplitter};

fn d(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(offset)
}

#[test]
fn twelve_days_in_five_day_windows() {
    let s = WindowSplitter::new(d(0), d(11), 5).unwrap();
    let windows: Vec<DateWindow> = s.iter().collect();
    assert_eq!(
        windows,
        vec![
            DateWindow { from: d(0), to: d(4) },
            DateWindow { from: d(5), to: d(9) },
            DateWindow { from: d(10), to: d(11) },
        ]
    );
}

#[test]
fn single_day_yields_one_window() {
    let s = WindowSplitter::new(d(3), d(3), 5).unwrap();
    assert_eq!(s.iter().collect::<Vec<_>>(), vec![DateWindow { from: d(3), to: d(3) }]);
}

#[test]
fn splitter_is_restartable() {
    let s = WindowSplitter::new(d(0), d(20), 5).unwrap();
    let first: Vec<_> = s.iter().collect();
    let second: Vec<_> = (&s).into_iter().collect();
    assert_eq!(first, second);
}

#[test]
fn inverted_range_is_rejected() {
    let err = WindowSplitter::new(d(5), d(1), 5).unwrap_err();
    assert_eq!(err, TickweaveError::InvalidRange { from: d(5), to: d(1) });
    assert!(matches!(
        WindowSplitter::new(d(1), d(5), 0),
        Err(TickweaveError::InvalidArg(_))
    ));
}

#[test]
fn backward_walk_from_anchor() {
    let w: Vec<_> = BackwardWindows::new(d(11), d(0), 5).unwrap().collect();
    assert_eq!(
        w,
        vec![
            DateWindow { from: d(7), to: d(11) },
            DateWindow { from: d(2), to: d(6) },
            DateWindow { from: d(0), to: d(1) },
        ]
    );
    let only: Vec<_> = BackwardWindows::new(d(4), d(4), 5).unwrap().collect();
    assert_eq!(only, vec![DateWindow { from: d(4), to: d(4) }]);
    assert!(BackwardWindows::new(d(1), d(2), 5).is_err());
}

fn assert_exact_cover(mut windows: Vec<DateWindow>, from: NaiveDate, to: NaiveDate, span: u32) {
    windows.sort_by_key(|w| w.from);
    assert_eq!(windows.first().unwrap().from, from);
    assert_eq!(windows.last().unwrap().to, to);
    for w in &windows {
        assert!(w.from <= w.to);
        assert!(w.days() <= u64::from(span));
    }
    for pair in windows.windows(2) {
        assert_eq!(pair[0].to.succ_opt().unwrap(), pair[1].from);
    }
}

proptest! {
    #[test]
    fn forward_windows_cover_range_exactly(start in 0u64..4000, len in 0u64..400, span in 1u32..40) {
        let (from, to) = (d(start), d(start + len));
        let windows: Vec<_> = WindowSplitter::new(from, to, span).unwrap().iter().collect();
        prop_assert!(windows.windows(2).all(|p| p[0].to < p[1].from));
        let expected = (len + 1).div_ceil(u64::from(span));
        prop_assert_eq!(windows.len() as u64, expected);
        assert_exact_cover(windows, from, to, span);
    }

    #[test]
    fn backward_windows_cover_range_exactly(start in 0u64..4000, len in 0u64..400, span in 1u32..40) {
        let (floor, anchor) = (d(start), d(start + len));
        let windows: Vec<_> = BackwardWindows::new(anchor, floor, span).unwrap().collect();
        prop_assert_eq!(windows[0].to, anchor);
        prop_assert!(windows.windows(2).all(|p| p[0].from > p[1].to));
        assert_exact_cover(windows, floor, anchor, span);
    }
}
