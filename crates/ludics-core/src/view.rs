// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Views
// ─────────────────────────────────────────────────────────────────────
//! Justification pointers and owner views (P-views) of plays.
//!
//! A move is justified by the latest earlier move of the other player
//! that sits either at the same locus, or at the parent locus and opens
//! the move's last label. A DAIMON answers whatever was played last.
//! The view walks a play backwards: own moves step to their
//! predecessor, opponent moves jump to their justifier.

use std::collections::BTreeSet;

use ludics_types::{ActKind, Play, PlayMove, Strategy};

fn justifies(earlier: &PlayMove, later: &PlayMove) -> bool {
    if earlier.polarity == later.polarity {
        return false;
    }
    if earlier.locus == later.locus {
        return true;
    }
    later.locus.parent().is_some_and(|parent| {
        parent == earlier.locus && earlier.ramification.contains(later.locus.last())
    })
}

/// Index of the move justifying `moves[index]`, if any.
pub fn justifier(play: &Play, index: usize) -> Option<usize> {
    let target = play.moves.get(index)?;
    if target.kind == ActKind::Daimon {
        return index.checked_sub(1);
    }
    (0..index).rev().find(|&j| justifies(&play.moves[j], target))
}

/// The owner's view of `play`.
pub fn view(play: &Play) -> Play {
    let mut kept: Vec<PlayMove> = Vec::new();
    let mut cursor = play.moves.len().checked_sub(1);

    while let Some(i) = cursor {
        let current = &play.moves[i];
        kept.push(current.clone());
        cursor = if current.polarity == play.owner {
            i.checked_sub(1)
        } else {
            justifier(play, i)
        };
    }

    kept.reverse();
    Play {
        owner: play.owner,
        moves: kept,
    }
}

/// A play that is its own view.
pub fn is_view(play: &Play) -> bool {
    view(play) == *play
}

/// Views of every play, as a set.
pub fn views<'a>(plays: impl IntoIterator<Item = &'a Play>) -> BTreeSet<Play> {
    plays.into_iter().map(view).collect()
}

/// Views of a strategy's plays.
pub fn strategy_views(strategy: &Strategy) -> BTreeSet<Play> {
    views(&strategy.plays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludics_types::{Locus, Polarity, Ramification};

    fn mv(locus: &str, polarity: Polarity, labels: &[u32]) -> PlayMove {
        PlayMove {
            locus: Locus::parse(locus).unwrap(),
            polarity,
            kind: ActKind::Proper,
            ramification: Ramification::new(labels.iter().copied()),
            act: None,
        }
    }

    use Polarity::{Negative as N, Positive as P};

    fn play(owner: Polarity, moves: Vec<PlayMove>) -> Play {
        Play { owner, moves }
    }

    // ── Justifier tests ───────────────────────────────────────────

    #[test]
    fn test_justifier_same_locus() {
        let p = play(P, vec![mv("0", P, &[1]), mv("0", N, &[1])]);
        assert_eq!(justifier(&p, 1), Some(0));
        assert_eq!(justifier(&p, 0), None);
    }

    #[test]
    fn test_justifier_parent_opening() {
        let p = play(
            P,
            vec![mv("0", P, &[1, 2]), mv("0", N, &[2]), mv("0.2", P, &[])],
        );
        assert_eq!(justifier(&p, 2), Some(1));
    }

    #[test]
    fn test_justifier_skips_closed_parent() {
        let p = play(P, vec![mv("0", N, &[1]), mv("0.2", P, &[])]);
        assert_eq!(justifier(&p, 1), None);
    }

    #[test]
    fn test_daimon_answers_last_move() {
        let mut p = play(P, vec![mv("0", P, &[1, 2]), mv("0", N, &[2])]);
        p.moves.push(PlayMove {
            kind: ActKind::Daimon,
            ramification: Ramification::empty(),
            ..mv("0.2", N, &[])
        });
        assert_eq!(justifier(&p, 2), Some(1));
        assert!(is_view(&p));
    }

    #[test]
    fn test_justifier_out_of_range() {
        let p = play(P, vec![]);
        assert_eq!(justifier(&p, 3), None);
    }

    // ── View tests ────────────────────────────────────────────────

    #[test]
    fn test_linear_play_is_its_own_view() {
        let p = play(
            P,
            vec![
                mv("0", P, &[1]),
                mv("0", N, &[1]),
                mv("0.1", P, &[1]),
                mv("0.1", N, &[1]),
            ],
        );
        assert!(is_view(&p));
    }

    #[test]
    fn test_view_drops_unrelated_branch() {
        // O returns to the root after P explored 0.1.
        let p = play(
            P,
            vec![
                mv("0", P, &[1, 2]),
                mv("0.1", N, &[1]),
                mv("0.1.1", P, &[]),
                mv("0.2", N, &[1]),
                mv("0.2.1", P, &[]),
            ],
        );
        let v = view(&p);
        let loci: Vec<String> = v.moves.iter().map(|m| m.locus.to_string()).collect();
        assert_eq!(loci, ["0", "0.2", "0.2.1"]);
        assert!(!is_view(&p));
    }

    #[test]
    fn test_view_is_idempotent() {
        let p = play(
            P,
            vec![
                mv("0", P, &[1, 2]),
                mv("0.1", N, &[1]),
                mv("0.1.1", P, &[]),
                mv("0.2", N, &[1]),
                mv("0.2.1", P, &[]),
            ],
        );
        let v = view(&p);
        assert_eq!(view(&v), v);
    }

    #[test]
    fn test_negative_owner_view() {
        let p = play(
            N,
            vec![mv("0", P, &[1]), mv("0", N, &[1]), mv("0.1", P, &[])],
        );
        assert!(is_view(&p));
        assert_eq!(view(&play(N, vec![])).len(), 0);
    }

    #[test]
    fn test_views_collapse_duplicates() {
        let a = play(P, vec![mv("0", P, &[1])]);
        let b = a.clone();
        assert_eq!(views([&a, &b]).len(), 1);
    }
}
