//! Myers O(ND) shortest edit script in linear space.
//!
//! Works over any slice of comparable tokens; the caller decides whether
//! tokens are words or lines. The search finds the middle snake of each
//! subproblem and recurses on both halves, so memory stays O(N + M) no
//! matter how far apart the inputs are.

use std::ops::Range;

/// One step of an edit script, indexing into the original slices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Equal { a: usize, b: usize },
    Delete { a: usize },
    Insert { b: usize },
}

/// Compute a minimal edit script turning `a` into `b`
///
/// Within each run of changes, deletes come before inserts.
pub fn diff<T: PartialEq>(a: &[T], b: &[T]) -> Vec<Edit> {
    // Diagonals reach at most (N + M + 1) / 2 + 1 in either direction
    let offset = (a.len() + b.len() + 1) / 2 + 2;
    let mut search = Search {
        a,
        b,
        offset: offset as isize,
        forward: vec![0; 2 * offset + 1],
        backward: vec![0; 2 * offset + 1],
        edits: Vec::with_capacity(a.len().max(b.len())),
    };
    search.conquer(0..a.len(), 0..b.len());
    deletes_first(search.edits)
}

struct Search<'a, T> {
    a: &'a [T],
    b: &'a [T],
    offset: isize,
    forward: Vec<isize>,
    backward: Vec<isize>,
    edits: Vec<Edit>,
}

impl<'a, T: PartialEq> Search<'a, T> {
    fn conquer(&mut self, mut a: Range<usize>, mut b: Range<usize>) {
        let (all_a, all_b) = (self.a, self.b);

        let prefix = all_a[a.clone()]
            .iter()
            .zip(&all_b[b.clone()])
            .take_while(|(x, y)| x == y)
            .count();
        self.edits.extend((0..prefix).map(|i| Edit::Equal {
            a: a.start + i,
            b: b.start + i,
        }));
        a.start += prefix;
        b.start += prefix;

        let suffix = all_a[a.clone()]
            .iter()
            .rev()
            .zip(all_b[b.clone()].iter().rev())
            .take_while(|(x, y)| x == y)
            .count();
        a.end -= suffix;
        b.end -= suffix;

        if a.is_empty() || b.is_empty() {
            self.replace(a.clone(), b.clone());
        } else if let Some((x, y)) = self.middle_snake(a.clone(), b.clone()) {
            self.conquer(a.start..x, b.start..y);
            self.conquer(x..a.end, y..b.end);
        } else {
            self.replace(a.clone(), b.clone());
        }

        self.edits.extend((0..suffix).map(|i| Edit::Equal {
            a: a.end + i,
            b: b.end + i,
        }));
    }

    fn replace(&mut self, a: Range<usize>, b: Range<usize>) {
        self.edits.extend(a.map(|a| Edit::Delete { a }));
        self.edits.extend(b.map(|b| Edit::Insert { b }));
    }

    /// Split point on an optimal path through `a` x `b`
    ///
    /// Both ranges must be non-empty with no common prefix or suffix. The
    /// returned point is strictly inside the grid so each half is smaller.
    fn middle_snake(&mut self, a: Range<usize>, b: Range<usize>) -> Option<(usize, usize)> {
        let (all_a, all_b) = (self.a, self.b);
        let old = &all_a[a.clone()];
        let new = &all_b[b.clone()];
        let n = old.len() as isize;
        let m = new.len() as isize;
        let delta = n - m;
        let odd = delta & 1 == 1;
        let offset = self.offset;
        let at = move |k: isize| (k + offset) as usize;
        let (forward, backward) = (&mut self.forward, &mut self.backward);

        forward[at(1)] = 0;
        backward[at(1)] = 0;
        let mut split = None;

        'search: for d in 0..(n + m + 1) / 2 + 1 {
            let mut k = -d;
            while k <= d {
                let mut x = if k == -d || (k != d && forward[at(k - 1)] < forward[at(k + 1)]) {
                    forward[at(k + 1)]
                } else {
                    forward[at(k - 1)] + 1
                };
                let (x0, y0) = (x, x - k);
                let mut y = y0;
                while x < n && y < m && old[x as usize] == new[y as usize] {
                    x += 1;
                    y += 1;
                }
                forward[at(k)] = x;
                if odd && (k - delta).abs() < d && x + backward[at(delta - k)] >= n {
                    split = Some((x0, y0));
                    break 'search;
                }
                k += 2;
            }

            // Backward coordinates count from the far corner
            let mut k = -d;
            while k <= d {
                let mut x = if k == -d || (k != d && backward[at(k - 1)] < backward[at(k + 1)]) {
                    backward[at(k + 1)]
                } else {
                    backward[at(k - 1)] + 1
                };
                let mut y = x - k;
                while x < n && y < m && old[(n - x - 1) as usize] == new[(m - y - 1) as usize] {
                    x += 1;
                    y += 1;
                }
                backward[at(k)] = x;
                if !odd && (k - delta).abs() <= d && x + forward[at(delta - k)] >= n {
                    split = Some((n - x, m - y));
                    break 'search;
                }
                k += 2;
            }
        }

        split
            .filter(|&(x, y)| {
                (0..=n).contains(&x) && (0..=m).contains(&y) && x + y > 0 && x + y < n + m
            })
            .map(|(x, y)| (a.start + x as usize, b.start + y as usize))
    }
}

/// Reorder each run of changes so its deletes precede its inserts
fn deletes_first(edits: Vec<Edit>) -> Vec<Edit> {
    let mut out = Vec::with_capacity(edits.len());
    let mut inserts = Vec::new();
    for edit in edits {
        match edit {
            Edit::Insert { .. } => inserts.push(edit),
            Edit::Delete { .. } => out.push(edit),
            Edit::Equal { .. } => {
                out.append(&mut inserts);
                out.push(edit);
            }
        }
    }
    out.append(&mut inserts);
    out
}
