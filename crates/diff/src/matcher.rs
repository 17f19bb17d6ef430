use std::ops::Range;

use imara_diff::intern::InternedInput;
use similar::DiffTag;

use crate::diff_hunk::Hunk;
use crate::options::DiffAlgorithm;

/// Finds the regions where two key sequences differ.
///
/// Keys are opaque bytes; two lines match exactly when their keys are equal.
/// Implementations return hunks sorted by `left_start`, non-overlapping,
/// and covering every difference; anything not covered is equal. Identical
/// inputs must produce no hunks.
pub trait SequenceMatcher {
    fn hunks(&self, left: &[&[u8]], right: &[&[u8]]) -> Vec<Hunk>;
}

impl SequenceMatcher for DiffAlgorithm {
    fn hunks(&self, left: &[&[u8]], right: &[&[u8]]) -> Vec<Hunk> {
        if left == right {
            return Vec::new();
        }

        let hunks = match self {
            DiffAlgorithm::Myers => similar_hunks(similar::Algorithm::Myers, left, right),
            DiffAlgorithm::Patience => similar_hunks(similar::Algorithm::Patience, left, right),
            DiffAlgorithm::Histogram => imara_hunks(imara_diff::Algorithm::Histogram, left, right),
            DiffAlgorithm::Minimal => imara_hunks(imara_diff::Algorithm::MyersMinimal, left, right),
        };
        log::trace!("{} matcher produced {} hunks", self, hunks.len());
        hunks
    }
}

fn similar_hunks(algorithm: similar::Algorithm, left: &[&[u8]], right: &[&[u8]]) -> Vec<Hunk> {
    let ops = similar::capture_diff_slices(algorithm, left, right);
    let changes = ops.iter().filter_map(|op| {
        let (tag, old, new) = op.as_tag_tuple();
        (tag != DiffTag::Equal).then_some((old, new))
    });
    coalesce(changes)
}

fn imara_hunks(algorithm: imara_diff::Algorithm, left: &[&[u8]], right: &[&[u8]]) -> Vec<Hunk> {
    let mut input: InternedInput<&[u8]> = InternedInput::new(&b""[..], &b""[..]);
    input.update_before(left.iter().copied());
    input.update_after(right.iter().copied());

    let mut changes: Vec<(Range<usize>, Range<usize>)> = Vec::new();
    imara_diff::diff(algorithm, &input, |before: Range<u32>, after: Range<u32>| {
        changes.push((
            before.start as usize..before.end as usize,
            after.start as usize..after.end as usize,
        ));
    });
    coalesce(changes)
}

/// Merge touching change ranges into maximal hunks.
///
/// Libraries may report a deletion directly followed by an insertion as two
/// separate ops; with no equal line between them they are one region.
fn coalesce<I>(changes: I) -> Vec<Hunk>
where
    I: IntoIterator<Item = (Range<usize>, Range<usize>)>,
{
    let mut hunks: Vec<Hunk> = Vec::new();
    for (old, new) in changes {
        if old.is_empty() && new.is_empty() {
            continue;
        }
        match hunks.last_mut() {
            Some(last) if last.left_end() == old.start && last.right_end() == new.start => {
                last.left_count += old.len();
                last.right_count += new.len();
            }
            _ => hunks.push(Hunk::from_ranges(old, new)),
        }
    }
    hunks
}
