//! Constructing [`Board`]s, either termini by termini or from puzzle text.

use std::str::FromStr;

use itertools::Itertools;

use crate::board::Board;
use crate::color::MAX_COLORS;
use crate::error::{BuildError, BuilderInvalidReason, ParseError};
use crate::location::{Dimension, Location};
use crate::puzzle::{Flow, Puzzle};
use crate::state::State;

/// Functionality all builders must implement.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
pub trait Builder: Clone {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order.
    fn with_dims(dims: (Dimension, Dimension)) -> Self;
    /// Add termini or "flow endpoints". The flow is grown from `locations.0` toward `locations.1`.
    ///
    /// May cause the builder to enter an invalid state if either location is out of bounds or already taken,
    /// if both locations coincide, or if the color or color count is rejected.
    /// If the builder is already in an invalid state, this function does nothing.
    fn add_termini(&mut self, display: char, locations: (Location, Location)) -> &mut Self;
    /// Remove the most recently added pair of termini.
    ///
    /// If the builder is in an invalid state or no termini are present, this function does nothing.
    fn pop_termini(&mut self) -> &mut Self;
    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>>;
    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, the [`BuildError`] lists why.
    fn build(&self) -> Result<Board, BuildError>;
}

/// A builder for rectangular boards of square cells, as found in Numberlink puzzles and Flow Free.
#[derive(Clone)]
pub struct BoardBuilder {
    // width, height
    dims: (Dimension, Dimension),
    flows: Vec<Flow>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl BoardBuilder {
    fn in_bounds(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    fn occupied(&self, location: Location) -> bool {
        self.flows.iter().any(|flow| flow.initial == location || flow.goal == location)
    }

    fn check_termini(&self, display: char, locations: (Location, Location)) -> Option<BuilderInvalidReason> {
        let both = [locations.0, locations.1];

        if let Some(outside) = both.iter().find(|location| !self.in_bounds(**location)) {
            return Some(BuilderInvalidReason::FeatureOutOfBounds(*outside));
        }
        if locations.0 == locations.1 {
            return Some(BuilderInvalidReason::DegenerateTermini(display));
        }
        if let Some(taken) = both.iter().find(|location| self.occupied(**location)) {
            return Some(BuilderInvalidReason::OverlappingFeature(*taken));
        }
        if self.flows.iter().any(|flow| flow.display == display) {
            return Some(BuilderInvalidReason::DuplicateColor(display));
        }
        if self.flows.len() >= MAX_COLORS {
            return Some(BuilderInvalidReason::TooManyColors);
        }

        None
    }
}

impl Builder for BoardBuilder {
    fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            flows: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    fn add_termini(&mut self, display: char, locations: (Location, Location)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match self.check_termini(display, locations) {
            Some(reason) => self.invalid_reasons.push(reason),
            None => self.flows.push(Flow { display, initial: locations.0, goal: locations.1 }),
        }

        self
    }

    fn pop_termini(&mut self) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.flows.pop();
        }

        self
    }

    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        match self.invalid_reasons.is_empty() {
            true => None,
            false => Some(&self.invalid_reasons),
        }
    }

    fn build(&self) -> Result<Board, BuildError> {
        if let Some(reasons) = self.is_valid() {
            return Err(BuildError { reasons: reasons.clone() });
        }

        let puzzle = Puzzle::new(self.dims, self.flows.clone());
        let state = State::new(&puzzle);
        Ok(Board { puzzle, state })
    }
}

/// Characters standing for a free cell in puzzle text.
const FREE_CHARS: [char; 3] = ['.', '_', '-'];

/// Parse the plain text puzzle format: one line per row, free cells drawn as `.`, `_` or `-`,
/// and any other character marking one of the two endpoints of that color.
/// The first endpoint of a color in reading order is the one its flow grows from.
impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect_vec())
            .collect_vec();

        let width = rows.first().map(Vec::len).ok_or(ParseError::Empty)?;
        if let Some((row, cells)) = rows.iter().find_position(|cells| cells.len() != width) {
            return Err(ParseError::RaggedRow { row, expected: width, found: cells.len() });
        }

        // in order of first appearance
        let mut endpoints: Vec<(char, Vec<Location>)> = Vec::new();
        for (y, cells) in rows.iter().enumerate() {
            for (x, display) in cells.iter().enumerate() {
                if FREE_CHARS.contains(display) {
                    continue;
                }
                match endpoints.iter_mut().find(|(seen, _)| seen == display) {
                    Some((_, locations)) if locations.len() >= 2 => return Err(ParseError::TooManyEndpoints(*display)),
                    Some((_, locations)) => locations.push(Location(x, y)),
                    None => endpoints.push((*display, vec![Location(x, y)])),
                }
            }
        }

        let (Some(width), Some(height)) = (Dimension::new(width), Dimension::new(rows.len())) else {
            return Err(ParseError::Empty);
        };
        let mut builder = BoardBuilder::with_dims((width, height));
        for (display, locations) in endpoints {
            match locations[..] {
                [initial, goal] => builder.add_termini(display, (initial, goal)),
                _ => return Err(ParseError::UnpairedColor(display)),
            };
        }

        Ok(builder.build()?)
    }
}
