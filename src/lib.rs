// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! mars-rovers: drives a squad of rovers across a rectangular plateau.
//!
//! The plateau is described by a small text format: a first line holding the plateau's upper-right
//! corner, followed by one pair of lines per rover (its starting coordinates and heading, then its
//! instructions). Rovers are driven one after the other, in input order, and each rover finishes
//! its whole instruction sequence before the next one starts. A rover that would drive off the
//! plateau simply stays where it is for that step; a rover that would drive onto a cell occupied by
//! another rover aborts the whole run. In this library, we only implement the parsing and the
//! movement rules; reading the description and presenting the result is left to the user.

#![no_std]

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::error::Error;
use core::fmt::{Debug, Display, Formatter};
use core::str::FromStr;
use log::{debug, trace, warn};
use num_traits::{CheckedAdd, CheckedSub, Num, One, Unsigned, Zero};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

extern crate alloc;

/// The direction a rover is facing. Rotating right walks the cycle north, east, south, west.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum Heading {
    /// Facing towards increasing `y`.
    North,
    /// Facing towards increasing `x`.
    East,
    /// Facing towards decreasing `y`.
    South,
    /// Facing towards decreasing `x`.
    West,
}

impl Heading {
    /// Every heading, in clockwise order starting from north.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// The heading after a quarter turn to the left.
    pub fn left(self) -> Self {
        Self::ALL[(self as usize + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// The heading after a quarter turn to the right.
    pub fn right(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }
}

impl TryFrom<char> for Heading {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'N' => Ok(Heading::North),
            'E' => Ok(Heading::East),
            'S' => Ok(Heading::South),
            'W' => Ok(Heading::West),
            other => Err(other),
        }
    }
}

impl Display for Heading {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Heading::North => "N",
            Heading::East => "E",
            Heading::South => "S",
            Heading::West => "W",
        })
    }
}

/// A single instruction for a rover.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum Instruction {
    /// Rotate a quarter turn to the left without moving.
    Left,
    /// Rotate a quarter turn to the right without moving.
    Right,
    /// Move one cell forward in the current heading.
    Move,
}

impl TryFrom<char> for Instruction {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'L' => Ok(Instruction::Left),
            'R' => Ok(Instruction::Right),
            'M' => Ok(Instruction::Move),
            other => Err(other),
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Instruction::Left => "L",
            Instruction::Right => "R",
            Instruction::Move => "M",
        })
    }
}

/// Marker trait: specifies that a value may be used for plateau coordinates.
pub trait GridValue:
    One
    + Zero
    + Ord
    + CheckedAdd
    + CheckedSub
    + Copy
    + Num
    + Unsigned
    + Debug
    + Display
    + DeserializeOwned
    + Serialize
    + 'static
{
}

impl<V> GridValue for V where
    V: One
        + Zero
        + Ord
        + CheckedAdd
        + CheckedSub
        + Copy
        + Num
        + Unsigned
        + Debug
        + Display
        + DeserializeOwned
        + Serialize
        + 'static
{
}

/// A cell on the plateau (eff., a coordinate pair).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Position<V> {
    x: V,
    y: V,
}

impl<V> Position<V> {
    /// The horizontal coordinate of the position.
    pub fn x(&self) -> &V {
        &self.x
    }

    /// The vertical coordinate of the position.
    pub fn y(&self) -> &V {
        &self.y
    }
}

impl<V> From<(V, V)> for Position<V> {
    fn from((x, y): (V, V)) -> Self {
        Self { x, y }
    }
}

impl<V> Position<V>
where
    V: GridValue,
{
    /// Get the position one cell away from this position in the provided heading. If that cell is
    /// off the plateau, the position is unchanged.
    pub fn advance(&self, heading: Heading, plateau: &Plateau<V>) -> Self {
        let one = V::one();
        let shifted = match heading {
            Heading::North => self
                .y
                .checked_add(&one)
                .filter(|y| *y <= plateau.height)
                .map(|y| Self { x: self.x, y }),
            Heading::East => self
                .x
                .checked_add(&one)
                .filter(|x| *x <= plateau.width)
                .map(|x| Self { x, y: self.y }),
            Heading::South => self.y.checked_sub(&one).map(|y| Self { x: self.x, y }),
            Heading::West => self.x.checked_sub(&one).map(|x| Self { x, y: self.y }),
        };
        shifted.unwrap_or(*self)
    }
}

impl<V> Display for Position<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The plateau the rovers drive on. Both bounds are inclusive, so a `5 5` plateau spans the cells
/// `(0, 0)` through `(5, 5)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Plateau<V> {
    width: V,
    height: V,
}

impl<V> Plateau<V> {
    /// The largest valid `x` coordinate.
    pub fn width(&self) -> &V {
        &self.width
    }

    /// The largest valid `y` coordinate.
    pub fn height(&self) -> &V {
        &self.height
    }
}

impl<V> Plateau<V>
where
    V: GridValue,
{
    /// Create a new plateau with the provided upper bounds. Both must be at least one.
    pub fn new(width: V, height: V) -> Option<Self> {
        if width.is_zero() || height.is_zero() {
            None
        } else {
            Some(Self { width, height })
        }
    }

    /// Whether the position lies on this plateau.
    pub fn contains(&self, position: &Position<V>) -> bool {
        position.x <= self.width && position.y <= self.height
    }
}

/// A rover: where it is, where it faces, and what it has been told to do.
#[derive(Clone, Debug, Hash, Deserialize, Serialize)]
pub struct Rover<V> {
    position: Position<V>,
    heading: Heading,
    instructions: Vec<Instruction>,
}

impl<V> Rover<V> {
    /// Create a rover at the provided position with the provided instructions.
    pub fn new<P: Into<Position<V>>>(
        position: P,
        heading: Heading,
        instructions: Vec<Instruction>,
    ) -> Self {
        Self {
            position: position.into(),
            heading,
            instructions,
        }
    }

    /// The current position of the rover.
    pub fn position(&self) -> &Position<V> {
        &self.position
    }

    /// The current heading of the rover.
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// The instructions the rover will execute, in order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

impl<V> Rover<V>
where
    V: GridValue,
{
    /// The position and heading the rover would have after executing `instruction`. The rover
    /// itself is left untouched.
    pub fn step(&self, instruction: Instruction, plateau: &Plateau<V>) -> (Position<V>, Heading) {
        match instruction {
            Instruction::Left => (self.position, self.heading.left()),
            Instruction::Right => (self.position, self.heading.right()),
            Instruction::Move => (self.position.advance(self.heading, plateau), self.heading),
        }
    }
}

/// Tracks the current position of every rover, keyed by rover index.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PositionRegistry<V> {
    positions: BTreeMap<usize, Position<V>>,
}

impl<V> Default for PositionRegistry<V> {
    fn default() -> Self {
        Self {
            positions: BTreeMap::new(),
        }
    }
}

impl<V> PositionRegistry<V>
where
    V: GridValue,
{
    /// Record the position of a rover, returning its previous position if it had one.
    pub fn update(&mut self, rover: usize, position: Position<V>) -> Option<Position<V>> {
        self.positions.insert(rover, position)
    }

    /// The recorded position of a rover.
    pub fn position(&self, rover: usize) -> Option<&Position<V>> {
        self.positions.get(&rover)
    }

    /// The rover other than `except` recorded at `position`, if any.
    pub fn occupant(&self, position: &Position<V>, except: usize) -> Option<usize> {
        self.positions
            .iter()
            .find(|(rover, recorded)| **rover != except && *recorded == position)
            .map(|(rover, _)| *rover)
    }
}

impl<V> FromIterator<(usize, Position<V>)> for PositionRegistry<V> {
    fn from_iter<T: IntoIterator<Item = (usize, Position<V>)>>(iter: T) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// The final position and heading of a rover once it has run out of instructions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct RoverReport<V> {
    position: Position<V>,
    heading: Heading,
}

impl<V> RoverReport<V> {
    /// The final position of the rover.
    pub fn position(&self) -> &Position<V> {
        &self.position
    }

    /// The final heading of the rover.
    pub fn heading(&self) -> Heading {
        self.heading
    }
}

impl<V> Display for RoverReport<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {} {}", self.position.x, self.position.y, self.heading)
    }
}

/// A part of a coordinate line which could not be understood, reported by
/// [`SimulationErrorType::InvalidRoverCoordinates`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CoordinateFault {
    /// The line did not hold exactly three tokens; it held this many.
    TokenCount(usize),
    /// The `x` coordinate is not an unsigned integer.
    X,
    /// The `y` coordinate is not an unsigned integer.
    Y,
    /// The heading is not one of `N`, `E`, `S` or `W`.
    Heading,
}

impl Display for CoordinateFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CoordinateFault::TokenCount(n) => write!(f, "expected 3 fields but found {n}"),
            CoordinateFault::X => f.write_str("X is not an unsigned integer"),
            CoordinateFault::Y => f.write_str("Y is not an unsigned integer"),
            CoordinateFault::Heading => f.write_str("D is not one of N, E, S or W"),
        }
    }
}

/// The type of failure observed in a [`SimulationError`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SimulationErrorType<V> {
    /// The input held the provided number of lines, which is even or less than three.
    InvalidLineCount(usize),
    /// The first line was not two positive integers separated by a single space, or one of them
    /// does not fit in the coordinate type (`u64` for [`simulate`]).
    InvalidPlateauDimensions(String),
    /// A coordinate line could not be understood. Every fault on the line is listed.
    InvalidRoverCoordinates {
        /// The offending line.
        line: String,
        /// Every part of the line that was rejected.
        faults: Vec<CoordinateFault>,
    },
    /// A rover started beyond the plateau's `x` bound.
    RoverOutsideXAxis {
        /// The starting `x` coordinate.
        x: V,
        /// The plateau's `x` bound.
        width: V,
    },
    /// A rover started beyond the plateau's `y` bound.
    RoverOutsideYAxis {
        /// The starting `y` coordinate.
        y: V,
        /// The plateau's `y` bound.
        height: V,
    },
    /// An instruction line was empty or held characters other than `L`, `M` and `R`.
    InvalidInstructions(String),
    /// The rover would have occupied the provided position, already held by the rover with the
    /// provided index.
    CollisionAvoided(Position<V>, usize),
}

/// The kind of a [`SimulationError`], without any of its details.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SimulationErrorKind {
    /// See [`SimulationErrorType::InvalidLineCount`].
    InvalidLineCount,
    /// See [`SimulationErrorType::InvalidPlateauDimensions`].
    InvalidPlateauDimensions,
    /// See [`SimulationErrorType::InvalidRoverCoordinates`].
    InvalidRoverCoordinates,
    /// See [`SimulationErrorType::RoverOutsideXAxis`].
    RoverOutsideXAxis,
    /// See [`SimulationErrorType::RoverOutsideYAxis`].
    RoverOutsideYAxis,
    /// See [`SimulationErrorType::InvalidInstructions`].
    InvalidInstructions,
    /// See [`SimulationErrorType::CollisionAvoided`].
    CollisionAvoided,
}

/// An error which stopped a simulation. No rover positions are reported once one is raised.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimulationError<V> {
    rover: Option<usize>,
    variant: SimulationErrorType<V>,
}

impl<V> SimulationError<V> {
    /// The index of the rover the error concerns, if it concerns one.
    pub fn rover(&self) -> Option<usize> {
        self.rover
    }

    /// The details of the error.
    pub fn variant(&self) -> &SimulationErrorType<V> {
        &self.variant
    }

    /// The kind of the error.
    pub fn kind(&self) -> SimulationErrorKind {
        match self.variant {
            SimulationErrorType::InvalidLineCount(_) => SimulationErrorKind::InvalidLineCount,
            SimulationErrorType::InvalidPlateauDimensions(_) => {
                SimulationErrorKind::InvalidPlateauDimensions
            }
            SimulationErrorType::InvalidRoverCoordinates { .. } => {
                SimulationErrorKind::InvalidRoverCoordinates
            }
            SimulationErrorType::RoverOutsideXAxis { .. } => SimulationErrorKind::RoverOutsideXAxis,
            SimulationErrorType::RoverOutsideYAxis { .. } => SimulationErrorKind::RoverOutsideYAxis,
            SimulationErrorType::InvalidInstructions(_) => SimulationErrorKind::InvalidInstructions,
            SimulationErrorType::CollisionAvoided(..) => SimulationErrorKind::CollisionAvoided,
        }
    }
}

impl<V> Display for SimulationError<V>
where
    V: GridValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if let Some(rover) = self.rover {
            write!(f, "rover {rover}: ")?;
        }
        match &self.variant {
            SimulationErrorType::InvalidLineCount(n) => write!(f, "the input must contain an odd number of at least three lines, but it contains {n}"),
            SimulationErrorType::InvalidPlateauDimensions(line) => write!(f, "the plateau must be described as \"X Y\" where X and Y are integers greater than zero, but got \"{line}\""),
            SimulationErrorType::InvalidRoverCoordinates { line, faults } => {
                write!(f, "coordinates must be described as \"X Y D\" where X and Y are unsigned integers and D is one of N, E, S or W, but \"{line}\" is invalid (")?;
                for (idx, fault) in faults.iter().enumerate() {
                    if idx != 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{fault}")?;
                }
                f.write_str(")")
            }
            SimulationErrorType::RoverOutsideXAxis { x, width } => write!(f, "cannot start at x = {x} because the plateau's X axis ends at {width}"),
            SimulationErrorType::RoverOutsideYAxis { y, height } => write!(f, "cannot start at y = {y} because the plateau's Y axis ends at {height}"),
            SimulationErrorType::InvalidInstructions(line) => write!(f, "instructions must be a non-empty sequence of L, M and R, but got \"{line}\""),
            SimulationErrorType::CollisionAvoided(at, other) => write!(f, "a collision with rover {other} at {at} has been avoided"),
        }
    }
}

impl<V> Error for SimulationError<V> where V: GridValue {}

fn parse_plateau<V>(line: &str) -> Result<Plateau<V>, SimulationErrorType<V>>
where
    V: GridValue,
{
    let invalid = || SimulationErrorType::InvalidPlateauDimensions(line.to_string());
    let (width, height) = line.split_once(' ').ok_or_else(invalid)?;
    let width = parse_dimension(width).ok_or_else(invalid)?;
    let height = parse_dimension(height).ok_or_else(invalid)?;
    Plateau::new(width, height).ok_or_else(invalid)
}

/// A digit string without a leading zero, so strictly positive.
fn parse_dimension<V>(token: &str) -> Option<V>
where
    V: GridValue,
{
    let bytes = token.as_bytes();
    if !matches!(bytes.first(), Some(b'1'..=b'9')) || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    V::from_str_radix(token, 10).ok()
}

fn parse_coordinates<V>(
    line: &str,
    plateau: &Plateau<V>,
) -> Result<(Position<V>, Heading), SimulationErrorType<V>>
where
    V: GridValue,
{
    let invalid = |faults: Vec<CoordinateFault>| SimulationErrorType::InvalidRoverCoordinates {
        line: line.to_string(),
        faults,
    };
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let &[x, y, heading] = tokens.as_slice() else {
        return Err(invalid(vec![CoordinateFault::TokenCount(tokens.len())]));
    };

    let mut faults = Vec::new();
    let x = match V::from_str_radix(x, 10) {
        Ok(x) if x > plateau.width => {
            return Err(SimulationErrorType::RoverOutsideXAxis {
                x,
                width: plateau.width,
            });
        }
        Ok(x) => Some(x),
        Err(_) => {
            faults.push(CoordinateFault::X);
            None
        }
    };
    let y = match V::from_str_radix(y, 10) {
        Ok(y) if y > plateau.height => {
            return Err(SimulationErrorType::RoverOutsideYAxis {
                y,
                height: plateau.height,
            });
        }
        Ok(y) => Some(y),
        Err(_) => {
            faults.push(CoordinateFault::Y);
            None
        }
    };
    let mut chars = heading.chars();
    let heading = match (chars.next(), chars.next()) {
        (Some(c), None) => Heading::try_from(c).ok(),
        _ => None,
    };
    if heading.is_none() {
        faults.push(CoordinateFault::Heading);
    }

    match (x, y, heading) {
        (Some(x), Some(y), Some(heading)) => Ok((Position { x, y }, heading)),
        _ => Err(invalid(faults)),
    }
}

fn parse_instructions<V>(line: &str) -> Result<Vec<Instruction>, SimulationErrorType<V>> {
    let invalid = || SimulationErrorType::InvalidInstructions(line.to_string());
    if line.is_empty() {
        return Err(invalid());
    }
    line.chars()
        .map(Instruction::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())
}

/// A plateau and the rovers deployed on it, in the order they will be driven. This is guaranteed
/// to be a valid deployment as long as it is produced by [`Deployment::parse`].
#[derive(Clone, Debug, Hash, Deserialize, Serialize)]
pub struct Deployment<V> {
    plateau: Plateau<V>,
    rovers: Vec<Rover<V>>,
}

impl<V> Deployment<V> {
    /// The plateau of this deployment.
    pub fn plateau(&self) -> &Plateau<V> {
        &self.plateau
    }

    /// The rovers of this deployment; a rover's index is its identity.
    pub fn rovers(&self) -> &[Rover<V>] {
        &self.rovers
    }
}

impl<V> Deployment<V>
where
    V: GridValue,
{
    /// Parse and validate a textual description of a plateau and its rovers.
    ///
    /// The first violation found is reported: the line count, then the plateau line, then each
    /// rover from top to bottom (its coordinates, then its instructions). Rovers may share a
    /// starting cell; only moves are checked for collisions.
    pub fn parse(input: &str) -> Result<Self, SimulationError<V>> {
        let lines: Vec<&str> = input.trim().split('\n').map(str::trim).collect();
        if lines.len() % 2 != 1 || lines.len() < 3 {
            return Err(SimulationError {
                rover: None,
                variant: SimulationErrorType::InvalidLineCount(lines.len()),
            });
        }

        let plateau = parse_plateau(lines[0]).map_err(|variant| SimulationError {
            rover: None,
            variant,
        })?;

        let mut rovers = Vec::with_capacity(lines.len() / 2);
        for (idx, pair) in lines[1..].chunks_exact(2).enumerate() {
            let error = |variant: SimulationErrorType<V>| SimulationError {
                rover: Some(idx),
                variant,
            };
            let (position, heading) = parse_coordinates(pair[0], &plateau).map_err(error)?;
            let instructions = parse_instructions(pair[1]).map_err(error)?;
            debug!(
                "rover {idx} deployed at {position} facing {heading} with {} instructions",
                instructions.len()
            );
            rovers.push(Rover {
                position,
                heading,
                instructions,
            });
        }

        Ok(Self { plateau, rovers })
    }

    /// Drive every rover through its instructions, in rover order, and report where each one
    /// ended up.
    ///
    /// Moves which would leave the plateau are skipped. A move onto the cell currently occupied by
    /// any other rover (including one which has not been driven yet) aborts the whole run.
    pub fn run(self) -> Result<Vec<RoverReport<V>>, SimulationError<V>> {
        let Self { plateau, rovers } = self;
        let mut registry: PositionRegistry<V> = rovers
            .iter()
            .map(|rover| rover.position)
            .enumerate()
            .collect();

        let mut reports = Vec::with_capacity(rovers.len());
        for (idx, mut rover) in rovers.into_iter().enumerate() {
            let instructions = core::mem::take(&mut rover.instructions);
            for instruction in instructions {
                let (position, heading) = rover.step(instruction, &plateau);
                if instruction == Instruction::Move {
                    if let Some(other) = registry.occupant(&position, idx) {
                        warn!("rover {idx} stopped before driving into rover {other} at {position}");
                        return Err(SimulationError {
                            rover: Some(idx),
                            variant: SimulationErrorType::CollisionAvoided(position, other),
                        });
                    }
                }
                trace!("rover {idx}: {instruction} -> {position} facing {heading}");
                rover.position = position;
                rover.heading = heading;
                registry.update(idx, position);
            }
            debug!(
                "rover {idx} finished at {} facing {}",
                rover.position, rover.heading
            );
            reports.push(RoverReport {
                position: rover.position,
                heading: rover.heading,
            });
        }
        Ok(reports)
    }
}

impl<V> FromStr for Deployment<V>
where
    V: GridValue,
{
    type Err = SimulationError<V>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the deployment in the same format [`Deployment::parse`] accepts.
impl<V> Display for Deployment<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.plateau.width, self.plateau.height)?;
        for rover in &self.rovers {
            write!(
                f,
                "\n{} {} {}\n",
                rover.position.x, rover.position.y, rover.heading
            )?;
            for instruction in &rover.instructions {
                write!(f, "{instruction}")?;
            }
        }
        Ok(())
    }
}

/// Parse `input`, drive its rovers, and render their final states one per line as `X Y D`.
pub fn simulate(input: &str) -> Result<String, SimulationError<u64>> {
    let reports = Deployment::<u64>::parse(input)?.run()?;
    Ok(reports
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}
