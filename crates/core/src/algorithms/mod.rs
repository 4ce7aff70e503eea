//! The sort engine family.
//!
//! Each engine runs eagerly against a private copy of its input and returns
//! a [`Trace`] of compare / swap / overwrite operations. The caller's slice
//! is never touched; the animated mutation of live state happens later, one
//! operation per tick, in the replay module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Operation, Result, SortVizError, Trace};

/// Largest scaled key the counting-sort key space accepts.
pub const MAX_COUNT_KEY: usize = 65_536;

/// Identity of one of the supported sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Quick,
    Merge,
    Heap,
    Bubble,
    Selection,
    Insertion,
    Count,
    Radix,
    Bucket,
    Shell,
    Comb,
}

impl Algorithm {
    pub const ALL: [Algorithm; 11] = [
        Algorithm::Quick,
        Algorithm::Merge,
        Algorithm::Heap,
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Count,
        Algorithm::Radix,
        Algorithm::Bucket,
        Algorithm::Shell,
        Algorithm::Comb,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Quick => "quick",
            Algorithm::Merge => "merge",
            Algorithm::Heap => "heap",
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Count => "count",
            Algorithm::Radix => "radix",
            Algorithm::Bucket => "bucket",
            Algorithm::Shell => "shell",
            Algorithm::Comb => "comb",
        }
    }

    /// Runs the matching engine over a copy of `input`.
    pub fn sort(&self, input: &[f32]) -> Result<Trace> {
        match self {
            Algorithm::Quick => quick(input),
            Algorithm::Merge => merge(input),
            Algorithm::Heap => heap(input),
            Algorithm::Bubble => bubble(input),
            Algorithm::Selection => selection(input),
            Algorithm::Insertion => insertion(input),
            Algorithm::Count => count(input),
            Algorithm::Radix => radix(input),
            Algorithm::Bucket => bucket(input),
            Algorithm::Shell => shell(input),
            Algorithm::Comb => comb(input),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortVizError;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| SortVizError::UnknownAlgorithm(s.to_string()))
    }
}

/// Quicksort with a Lomuto partition around the last element.
///
/// Every pivot probe is a compare; every in-partition exchange and the final
/// pivot placement are swaps.
pub fn quick(input: &[f32]) -> Result<Trace> {
    let mut work = input.to_vec();
    let mut trace = Trace::new(work.len());
    if work.len() > 1 {
        let end = work.len() - 1;
        quick_recurse(&mut work, 0, end, &mut trace);
    }
    Ok(trace)
}

fn quick_recurse(work: &mut [f32], start: usize, end: usize, trace: &mut Trace) {
    if start >= end {
        return;
    }
    let pivot = work[end];
    // Next slot for an element below the pivot.
    let mut boundary = start;
    for probe in start..end {
        trace.push(Operation::Compare { i: probe, j: end });
        if work[probe] < pivot {
            work.swap(boundary, probe);
            trace.push(Operation::Swap {
                i: boundary,
                j: probe,
            });
            boundary += 1;
        }
    }
    work.swap(boundary, end);
    trace.push(Operation::Swap {
        i: boundary,
        j: end,
    });
    if boundary > start {
        quick_recurse(work, start, boundary - 1, trace);
    }
    quick_recurse(work, boundary + 1, end, trace);
}

/// Top-down merge sort.
///
/// The merge step records a compare per head-to-head and an overwrite per
/// element placed; leftover elements from either half are overwrites only.
pub fn merge(input: &[f32]) -> Result<Trace> {
    let mut work = input.to_vec();
    let mut trace = Trace::new(work.len());
    if work.len() > 1 {
        let hi = work.len();
        merge_recurse(&mut work, 0, hi, &mut trace);
    }
    Ok(trace)
}

fn merge_recurse(work: &mut [f32], lo: usize, hi: usize, trace: &mut Trace) {
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_recurse(work, lo, mid, trace);
    merge_recurse(work, mid, hi, trace);

    let left = work[lo..mid].to_vec();
    let right = work[mid..hi].to_vec();
    let (mut i, mut j, mut k) = (0, 0, lo);
    while i < left.len() && j < right.len() {
        trace.push(Operation::Compare {
            i: lo + i,
            j: mid + j,
        });
        let value = if left[i] <= right[j] {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        work[k] = value;
        trace.push(Operation::Overwrite { i: k, value });
        k += 1;
    }
    for &value in &left[i..] {
        work[k] = value;
        trace.push(Operation::Overwrite { i: k, value });
        k += 1;
    }
    for &value in &right[j..] {
        work[k] = value;
        trace.push(Operation::Overwrite { i: k, value });
        k += 1;
    }
}

/// Heap sort over a bottom-up max-heap.
///
/// A compare is recorded only when a child beats the current largest during
/// sift-down; every root extraction and sift-down exchange is a swap.
pub fn heap(input: &[f32]) -> Result<Trace> {
    let mut work = input.to_vec();
    let mut trace = Trace::new(work.len());
    let n = work.len();
    if n > 1 {
        for root in (0..n / 2).rev() {
            sift_down(&mut work, n, root, &mut trace);
        }
        for end in (1..n).rev() {
            work.swap(0, end);
            trace.push(Operation::Swap { i: 0, j: end });
            sift_down(&mut work, end, 0, &mut trace);
        }
    }
    Ok(trace)
}

fn sift_down(work: &mut [f32], heap_len: usize, root: usize, trace: &mut Trace) {
    let mut largest = root;
    let left = 2 * root + 1;
    let right = 2 * root + 2;
    if left < heap_len && work[left] > work[largest] {
        trace.push(Operation::Compare {
            i: left,
            j: largest,
        });
        largest = left;
    }
    if right < heap_len && work[right] > work[largest] {
        trace.push(Operation::Compare {
            i: right,
            j: largest,
        });
        largest = right;
    }
    if largest != root {
        work.swap(root, largest);
        trace.push(Operation::Swap {
            i: root,
            j: largest,
        });
        sift_down(work, heap_len, largest, trace);
    }
}

/// Bubble sort, full passes until one completes without a swap.
///
/// Only swaps are recorded; in-order probes leave no trace.
pub fn bubble(input: &[f32]) -> Result<Trace> {
    let mut work = input.to_vec();
    let mut trace = Trace::new(work.len());
    if work.len() < 2 {
        return Ok(trace);
    }
    loop {
        let mut swapped = false;
        for i in 0..work.len() - 1 {
            if work[i] > work[i + 1] {
                work.swap(i, i + 1);
                trace.push(Operation::Swap { i, j: i + 1 });
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    Ok(trace)
}

/// Selection sort: a compare per candidate scanned, a swap only when the
/// minimum moved.
pub fn selection(input: &[f32]) -> Result<Trace> {
    let mut work = input.to_vec();
    let mut trace = Trace::new(work.len());
    let n = work.len();
    for i in 0..n {
        let mut min = i;
        for j in i + 1..n {
            trace.push(Operation::Compare { i: j, j: min });
            if work[j] < work[min] {
                min = j;
            }
        }
        if min != i {
            work.swap(i, min);
            trace.push(Operation::Swap { i, j: min });
        }
    }
    Ok(trace)
}

/// Insertion sort.
pub fn insertion(input: &[f32]) -> Result<Trace> {
    let mut work = input.to_vec();
    let mut trace = Trace::new(work.len());
    insertion_pass(&mut work, &mut trace);
    Ok(trace)
}

/// One full insertion pass: per shift a compare of the shifted-past pair
/// then the shifting overwrite; the key's final placement is its own
/// overwrite. Shared with the per-bucket sorting in [`bucket`].
fn insertion_pass(work: &mut [f32], trace: &mut Trace) {
    for i in 1..work.len() {
        let key = work[i];
        let mut j = i;
        while j > 0 && work[j - 1] > key {
            trace.push(Operation::Compare { i: j - 1, j });
            work[j] = work[j - 1];
            trace.push(Operation::Overwrite {
                i: j,
                value: work[j],
            });
            j -= 1;
        }
        work[j] = key;
        trace.push(Operation::Overwrite { i: j, value: key });
    }
}

/// Counting sort with the default scaled-key adapter:
/// `floor((value - min) * 100)`.
pub fn count(input: &[f32]) -> Result<Trace> {
    let min = input.iter().copied().fold(f32::INFINITY, f32::min);
    counting_sort_with_key(input, |value| scaled_key(value, min))
}

fn scaled_key(value: f32, min: f32) -> Result<usize> {
    let raw = ((value - min) * 100.0).floor();
    if !raw.is_finite() || raw < 0.0 || raw > MAX_COUNT_KEY as f32 {
        return Err(SortVizError::KeyRange {
            value,
            key: raw as i64,
        });
    }
    Ok(raw as usize)
}

/// Stable counting sort over a caller-supplied bounded integer key space.
///
/// The reverse placement scan records a swap and an overwrite per output
/// slot, then the copy-back pass records one overwrite per position.
pub fn counting_sort_with_key(
    input: &[f32],
    key_of: impl Fn(f32) -> Result<usize>,
) -> Result<Trace> {
    let n = input.len();
    let mut trace = Trace::new(n);
    if n == 0 {
        return Ok(trace);
    }

    let keys = input
        .iter()
        .map(|&value| key_of(value))
        .collect::<Result<Vec<_>>>()?;
    let max_key = keys.iter().copied().max().unwrap_or(0);

    let mut counts = vec![0usize; max_key + 1];
    for &key in &keys {
        counts[key] += 1;
    }
    for key in 1..counts.len() {
        counts[key] += counts[key - 1];
    }

    // Reverse scan keeps equal keys in input order.
    let mut output = vec![0.0f32; n];
    for i in (0..n).rev() {
        counts[keys[i]] -= 1;
        let dst = counts[keys[i]];
        output[dst] = input[i];
        trace.push(Operation::Swap { i, j: dst });
        trace.push(Operation::Overwrite {
            i: dst,
            value: input[i],
        });
    }
    for (i, &value) in output.iter().enumerate() {
        trace.push(Operation::Overwrite { i, value });
    }
    Ok(trace)
}

/// LSD base-10 radix sort.
///
/// Only defined for finite, non-negative, integer-valued elements; anything
/// else is rejected before a trace is built.
pub fn radix(input: &[f32]) -> Result<Trace> {
    let n = input.len();
    let mut trace = Trace::new(n);
    if n == 0 {
        return Ok(trace);
    }
    for &value in input {
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
            return Err(SortVizError::InvalidInput(
                "radix sort requires non-negative integer-valued elements",
            ));
        }
    }

    let mut work = input.to_vec();
    let max = work.iter().copied().fold(0.0f32, f32::max) as u64;
    let mut digits = 1;
    let mut rest = max;
    while rest >= 10 {
        rest /= 10;
        digits += 1;
    }

    let mut place: u64 = 1;
    for _ in 0..digits {
        let mut counts = [0usize; 10];
        for &value in &work {
            counts[digit(value, place)] += 1;
        }
        for d in 1..10 {
            counts[d] += counts[d - 1];
        }

        let mut output = vec![0.0f32; n];
        for i in (0..n).rev() {
            let d = digit(work[i], place);
            counts[d] -= 1;
            let dst = counts[d];
            output[dst] = work[i];
            trace.push(Operation::Swap { i, j: dst });
        }
        for (i, &value) in output.iter().enumerate() {
            trace.push(Operation::Overwrite { i, value });
        }
        work = output;
        place *= 10;
    }
    Ok(trace)
}

fn digit(value: f32, place: u64) -> usize {
    ((value as u64 / place) % 10) as usize
}

/// Bucket sort: distribute into `n` buckets by scaled value, sort each
/// bucket with the insertion engine, concatenate back.
///
/// The distribution marker is compare-tagged purely for the animation; no
/// comparison happens. Per-bucket insertion traces are discarded rather
/// than merged into the outer trace.
pub fn bucket(input: &[f32]) -> Result<Trace> {
    let n = input.len();
    let mut trace = Trace::new(n);
    if n == 0 {
        return Ok(trace);
    }

    let mut buckets: Vec<Vec<f32>> = vec![Vec::new(); n];
    for (i, &value) in input.iter().enumerate() {
        let slot = ((value * n as f32).floor() as isize).clamp(0, n as isize - 1) as usize;
        trace.push(Operation::Compare { i, j: slot });
        buckets[slot].push(value);
    }

    for values in &mut buckets {
        let mut scratch = Trace::new(values.len());
        insertion_pass(values, &mut scratch);
    }

    let mut k = 0;
    for values in &buckets {
        for &value in values {
            trace.push(Operation::Overwrite { i: k, value });
            k += 1;
        }
    }
    Ok(trace)
}

/// Shell sort with the n/2 halving gap sequence, tracing each gap-shift the
/// way insertion sort traces adjacent shifts.
pub fn shell(input: &[f32]) -> Result<Trace> {
    let mut work = input.to_vec();
    let mut trace = Trace::new(work.len());
    let n = work.len();
    let mut gap = n / 2;
    while gap > 0 {
        for i in gap..n {
            let key = work[i];
            let mut j = i;
            while j >= gap && work[j - gap] > key {
                trace.push(Operation::Compare { i: j - gap, j });
                work[j] = work[j - gap];
                trace.push(Operation::Overwrite {
                    i: j,
                    value: work[j],
                });
                j -= gap;
            }
            work[j] = key;
            trace.push(Operation::Overwrite { i: j, value: key });
        }
        gap /= 2;
    }
    Ok(trace)
}

/// Comb sort: bubble passes at a gap shrunk by 1.3 each round (floored,
/// minimum 1), swaps only, until a gap-1 pass swaps nothing.
pub fn comb(input: &[f32]) -> Result<Trace> {
    let mut work = input.to_vec();
    let mut trace = Trace::new(work.len());
    let n = work.len();
    if n < 2 {
        return Ok(trace);
    }
    let mut gap = n;
    let mut swapped = true;
    while gap > 1 || swapped {
        gap = ((gap as f32 / 1.3).floor() as usize).max(1);
        swapped = false;
        for i in 0..n - gap {
            if work[i] > work[i + gap] {
                work.swap(i, i + gap);
                trace.push(Operation::Swap { i, j: i + gap });
                swapped = true;
            }
        }
    }
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn replayed(algorithm: Algorithm, input: &[f32]) -> Vec<f32> {
        let mut trace = algorithm.sort(input).unwrap();
        let mut values = input.to_vec();
        trace.apply_all(&mut values).unwrap();
        values
    }

    fn assert_sorts(algorithm: Algorithm, input: &[f32]) {
        let mut expected = input.to_vec();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(
            replayed(algorithm, input),
            expected,
            "{algorithm} failed on {input:?}"
        );
    }

    fn random_unit_values(len: usize) -> Vec<f32> {
        let mut rng = rand::thread_rng();
        (0..len).map(|_| rng.gen::<f32>()).collect()
    }

    #[test]
    fn every_algorithm_sorts_random_unit_inputs() {
        // Radix needs integer-valued input and is covered separately.
        for algorithm in Algorithm::ALL {
            if algorithm == Algorithm::Radix {
                continue;
            }
            for len in [1, 2, 7, 20] {
                assert_sorts(algorithm, &random_unit_values(len));
            }
        }
    }

    #[test]
    fn every_algorithm_sorts_integer_valued_inputs() {
        let input = [5.0, 3.0, 8.0, 1.0, 3.0, 0.0, 13.0];
        for algorithm in Algorithm::ALL {
            assert_sorts(algorithm, &input);
        }
    }

    #[test]
    fn every_trace_index_is_in_bounds() {
        let input = random_unit_values(20);
        for algorithm in Algorithm::ALL {
            if algorithm == Algorithm::Radix {
                continue;
            }
            let trace = algorithm.sort(&input).unwrap();
            for op in trace.ops() {
                for index in op.touched() {
                    assert!(index < input.len(), "{algorithm} recorded index {index}");
                }
            }
        }
    }

    #[test]
    fn quick_replays_presorted_integers() {
        assert_eq!(
            replayed(Algorithm::Quick, &[5.0, 3.0, 8.0, 1.0]),
            vec![1.0, 3.0, 5.0, 8.0]
        );
    }

    #[test]
    fn bubble_emits_only_swaps() {
        let trace = bubble(&[5.0, 3.0, 8.0, 1.0]).unwrap();
        assert!(trace.remaining() > 0);
        for op in trace.ops() {
            assert!(matches!(op, Operation::Swap { .. }));
        }
        assert_eq!(
            replayed(Algorithm::Bubble, &[5.0, 3.0, 8.0, 1.0]),
            vec![1.0, 3.0, 5.0, 8.0]
        );
    }

    #[test]
    fn bubble_of_sorted_input_is_empty() {
        let trace = bubble(&[0.1, 0.2, 0.3]).unwrap();
        assert!(trace.is_drained());
    }

    #[test]
    fn selection_swaps_at_most_once_per_position() {
        let input = random_unit_values(12);
        let trace = selection(&input).unwrap();
        let swaps = trace
            .ops()
            .filter(|op| matches!(op, Operation::Swap { .. }))
            .count();
        assert!(swaps <= input.len());
    }

    #[test]
    fn merge_records_leftovers_as_overwrites() {
        // Right half exhausts first, leaving [0.8, 0.9] as plain overwrites.
        let trace = merge(&[0.8, 0.9, 0.1, 0.2]).unwrap();
        let ops: Vec<Operation> = trace.ops().copied().collect();
        assert!(ops[ops.len() - 2..]
            .iter()
            .all(|op| matches!(op, Operation::Overwrite { .. })));
    }

    #[test]
    fn count_sort_places_duplicates_stably() {
        let input = [0.2, 0.5, 0.2, 0.1];
        let mut placements = vec![None; input.len()];
        let trace = count(&input).unwrap();
        // The first 2n operations are the reverse placement scan; its swap
        // records carry (source, destination).
        for op in trace.ops().take(2 * input.len()) {
            if let Operation::Swap { i, j } = *op {
                placements[i] = Some(j);
            }
        }
        assert!(placements[0].unwrap() < placements[2].unwrap());
        assert_sorts(Algorithm::Count, &input);
    }

    #[test]
    fn count_sort_rejects_out_of_range_keys() {
        let err = count(&[0.0, 1e7]).unwrap_err();
        assert!(matches!(err, SortVizError::KeyRange { .. }));
    }

    #[test]
    fn counting_sort_honours_custom_keys() {
        let input = [3.0, 1.0, 2.0];
        let mut trace = counting_sort_with_key(&input, |v| Ok(v as usize)).unwrap();
        let mut values = input.to_vec();
        trace.apply_all(&mut values).unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn radix_sorts_multi_digit_integers() {
        assert_sorts(Algorithm::Radix, &[170.0, 45.0, 75.0, 90.0, 802.0, 24.0, 2.0, 66.0]);
    }

    #[test]
    fn radix_rejects_fractional_values() {
        let err = radix(&[1.0, 0.5]).unwrap_err();
        assert!(matches!(err, SortVizError::InvalidInput(_)));
    }

    #[test]
    fn radix_rejects_negative_values() {
        let err = radix(&[1.0, -2.0]).unwrap_err();
        assert!(matches!(err, SortVizError::InvalidInput(_)));
    }

    #[test]
    fn bucket_distribution_markers_stay_in_bounds() {
        // Values at or above 1.0 clamp into the last bucket.
        let input = [0.99, 1.0, 0.0, 0.5];
        let trace = bucket(&input).unwrap();
        for op in trace.ops() {
            for index in op.touched() {
                assert!(index < input.len());
            }
        }
        assert_sorts(Algorithm::Bucket, &input);
    }

    #[test]
    fn shell_and_comb_produce_replayable_traces() {
        let input = random_unit_values(20);
        for algorithm in [Algorithm::Shell, Algorithm::Comb] {
            let trace = algorithm.sort(&input).unwrap();
            assert!(trace.remaining() > 0 || input.windows(2).all(|w| w[0] <= w[1]));
            assert_sorts(algorithm, &input);
        }
    }

    #[test]
    fn names_round_trip_through_fromstr() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "bogo".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, SortVizError::UnknownAlgorithm(name) if name == "bogo"));
    }
}
