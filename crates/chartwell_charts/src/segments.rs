/// Return contiguous runs of indices whose value is finite.
///
/// Used to break series lines at missing (NaN or infinite) samples. Points
/// that are merely outside the visible range do not break a run; the caller
/// skips them and joins their neighbours. The returned ranges are half-open:
/// `[start, end)`.
pub fn finite_runs(values: &[f64], out: &mut Vec<(usize, usize)>) {
    out.clear();

    let mut start: Option<usize> = None;
    for (i, v) in values.iter().enumerate() {
        match (v.is_finite(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                out.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, values.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_run_when_everything_is_finite() {
        let mut runs = Vec::new();
        finite_runs(&[0.0, 1.0, 50.0, -4.0], &mut runs);
        assert_eq!(runs, vec![(0, 4)]);
    }

    #[test]
    fn missing_samples_split_runs() {
        let mut runs = Vec::new();
        finite_runs(&[0.0, 1.0, f64::NAN, 2.0, f64::INFINITY, 3.0], &mut runs);
        assert_eq!(runs, vec![(0, 2), (3, 4), (5, 6)]);
    }

    #[test]
    fn runs_handle_edge_cases() {
        let mut runs = vec![(9, 9)];
        finite_runs(&[], &mut runs);
        assert!(runs.is_empty());

        finite_runs(&[f64::NAN], &mut runs);
        assert!(runs.is_empty());

        finite_runs(&[f64::NAN, 0.5], &mut runs);
        assert_eq!(runs, vec![(1, 2)]);
    }
}
