use rand::Rng;
use std::fmt;

/// Number of moves in a generated scramble.
pub const SCRAMBLE_LEN: usize = 20;

/// Face draws are rejected while they clash with the previous move; four of
/// six faces are always acceptable, so this bound is never hit by a fair RNG.
const MAX_REDRAWS: usize = 64;

/// One of the six faces of the puzzle, in standard notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Face {
    U,
    D,
    R,
    L,
    F,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::R, Face::L, Face::F, Face::B];

    /// Opposite faces rotate around the same axis.
    pub fn axis(self) -> Axis {
        match self {
            Face::U | Face::D => Axis::Ud,
            Face::R | Face::L => Axis::Rl,
            Face::F | Face::B => Axis::Fb,
        }
    }
}

/// The three axis groups: {U,D}, {R,L}, {F,B}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Ud,
    Rl,
    Fb,
}

/// Turn direction suffix: plain quarter turn, counter-clockwise, or half turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Plain,
    Prime,
    Double,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Plain => Ok(()),
            Modifier::Prime => write!(f, "'"),
            Modifier::Double => write!(f, "2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub face: Face,
    pub modifier: Modifier,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.modifier)
    }
}

/// A fixed-length scramble. Immutable once generated; a fresh one is produced
/// after every completed solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrambleSequence {
    moves: Vec<Move>,
}

impl ScrambleSequence {
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl fmt::Display for ScrambleSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.moves.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}

/// Whether `candidate` may follow `previous`. Rejects the same face and any
/// face on the same axis, so e.g. U may not follow D. This is stricter than
/// competitive scrambling conventions, which allow a move on the opposite
/// face to follow.
pub fn is_allowed_after(previous: Option<Face>, candidate: Face) -> bool {
    match previous {
        None => true,
        Some(prev) => candidate != prev && candidate.axis() != prev.axis(),
    }
}

/// Generate a scramble of [`SCRAMBLE_LEN`] moves. Faces are drawn uniformly
/// and redrawn until they pass [`is_allowed_after`]; the modifier is drawn
/// once per move and never participates in rejection.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> ScrambleSequence {
    let mut moves = Vec::with_capacity(SCRAMBLE_LEN);
    let mut previous: Option<Face> = None;

    for _ in 0..SCRAMBLE_LEN {
        let face = draw_face(rng, previous);
        let modifier = match rng.gen_range(0..3) {
            0 => Modifier::Plain,
            1 => Modifier::Prime,
            _ => Modifier::Double,
        };

        moves.push(Move { face, modifier });
        previous = Some(face);
    }

    ScrambleSequence { moves }
}

fn draw_face<R: Rng + ?Sized>(rng: &mut R, previous: Option<Face>) -> Face {
    for _ in 0..MAX_REDRAWS {
        let face = Face::ALL[rng.gen_range(0..Face::ALL.len())];
        if is_allowed_after(previous, face) {
            return face;
        }
    }

    // Unreachable with a uniform RNG; keeps generation total regardless.
    Face::ALL
        .into_iter()
        .find(|&f| is_allowed_after(previous, f))
        .unwrap_or(Face::U)
}
