//! Maps the first positional token to a command.

use crate::application::Application;
use crate::command::Command;

/// Distances above this never resolve; gaps below it are too ambiguous.
const DISTANCE_LIMIT: usize = 3;

/// Finds a command by exact name, scanning the list in declared order.
///
/// Unlike [`find_nearest_command`] this does not skip sections; their
/// name is empty, so they only match an empty token.
pub fn find_command<'a>(app: &'a dyn Application, name: &str) -> Option<&'a Command> {
    app.commands().iter().find(|cmd| cmd.name() == name).copied()
}

/// Heuristically finds the command the user meant to type.
///
/// The cascade, first decisive step wins: exact match, unique
/// case-sensitive prefix, unique case-insensitive prefix, then nearest
/// by edit distance. The distance step only resolves when the best
/// candidate is within distance 3 of the token and beats the runner-up
/// by at least 3, so a short typo never silently runs a random command.
/// Sections are excluded throughout.
pub fn find_nearest_command<'a>(app: &'a dyn Application, token: &str) -> Option<&'a Command> {
    let candidates: Vec<&Command> = app
        .commands()
        .iter()
        .filter(|cmd| !cmd.is_section())
        .copied()
        .collect();

    if let Some(cmd) = candidates.iter().copied().find(|cmd| cmd.name() == token) {
        return Some(cmd);
    }

    let prefixed: Vec<&Command> = candidates
        .iter()
        .filter(|cmd| cmd.name().starts_with(token))
        .copied()
        .collect();
    if let &[only] = prefixed.as_slice() {
        return Some(only);
    }

    let lowered = token.to_lowercase();
    let prefixed: Vec<&Command> = candidates
        .iter()
        .filter(|cmd| cmd.name().to_lowercase().starts_with(&lowered))
        .copied()
        .collect();
    if let &[only] = prefixed.as_slice() {
        return Some(only);
    }

    let mut closest = 1000;
    let mut second = 1000;
    let mut winner = None;
    for cmd in &candidates {
        let distance = edit_distance(cmd.name(), token);
        if distance < closest {
            second = closest;
            closest = distance;
            winner = Some(*cmd);
        } else if distance < second {
            second = distance;
        }
    }
    if closest > DISTANCE_LIMIT || second - closest < DISTANCE_LIMIT {
        return None;
    }
    winner
}

/// Edit distance where an insertion or deletion costs 1 and a
/// substitution 2, i.e. a substitution counts as delete plus insert.
/// This keeps transpositions cheap (2) while pure letter swaps stay
/// expensive enough to trip the ambiguity gap.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut row = Vec::with_capacity(prev.len());
        row.push(i + 1);
        for (j, cb) in b_chars.iter().enumerate() {
            let substitute = prev.get(j).copied().unwrap_or_default()
                + if ca == *cb { 0 } else { 2 };
            let delete = prev.get(j + 1).copied().unwrap_or_default() + 1;
            let insert = row.last().copied().unwrap_or_default() + 1;
            row.push(substitute.min(delete).min(insert));
        }
        prev = row;
    }
    prev.last().copied().unwrap_or_default()
}
