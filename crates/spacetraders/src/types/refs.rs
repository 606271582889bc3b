//! References to game objects accepted by endpoint methods
//!
//! Endpoints that act on a ship or a location accept either the bare
//! identifier or an already-fetched object. The reference is resolved to the
//! canonical identifier once, before the route is built.

use super::{Location, Ship, Structure};

/// A ship, by id or by value.
#[derive(Debug, Clone, Copy)]
pub enum ShipRef<'a> {
    /// The ship's id
    Id(&'a str),
    /// A ship fetched earlier
    Ship(&'a Ship),
}

impl<'a> ShipRef<'a> {
    /// The canonical ship id.
    pub fn id(&self) -> &'a str {
        match self {
            ShipRef::Id(id) => id,
            ShipRef::Ship(ship) => &ship.id,
        }
    }
}

impl<'a> From<&'a str> for ShipRef<'a> {
    fn from(id: &'a str) -> Self {
        ShipRef::Id(id)
    }
}

impl<'a> From<&'a String> for ShipRef<'a> {
    fn from(id: &'a String) -> Self {
        ShipRef::Id(id)
    }
}

impl<'a> From<&'a Ship> for ShipRef<'a> {
    fn from(ship: &'a Ship) -> Self {
        ShipRef::Ship(ship)
    }
}

/// A location, by symbol or by value.
#[derive(Debug, Clone, Copy)]
pub enum LocationRef<'a> {
    /// The location's symbol
    Symbol(&'a str),
    /// A location fetched earlier
    Location(&'a Location),
}

impl<'a> LocationRef<'a> {
    /// The canonical location symbol.
    pub fn symbol(&self) -> &'a str {
        match self {
            LocationRef::Symbol(symbol) => symbol,
            LocationRef::Location(location) => &location.symbol,
        }
    }
}

impl<'a> From<&'a str> for LocationRef<'a> {
    fn from(symbol: &'a str) -> Self {
        LocationRef::Symbol(symbol)
    }
}

impl<'a> From<&'a String> for LocationRef<'a> {
    fn from(symbol: &'a String) -> Self {
        LocationRef::Symbol(symbol)
    }
}

impl<'a> From<&'a Location> for LocationRef<'a> {
    fn from(location: &'a Location) -> Self {
        LocationRef::Location(location)
    }
}

/// A structure, by id or by value.
#[derive(Debug, Clone, Copy)]
pub enum StructureRef<'a> {
    /// The structure's id
    Id(&'a str),
    /// A structure fetched earlier
    Structure(&'a Structure),
}

impl<'a> StructureRef<'a> {
    /// The canonical structure id.
    pub fn id(&self) -> &'a str {
        match self {
            StructureRef::Id(id) => id,
            StructureRef::Structure(structure) => &structure.id,
        }
    }
}

impl<'a> From<&'a str> for StructureRef<'a> {
    fn from(id: &'a str) -> Self {
        StructureRef::Id(id)
    }
}

impl<'a> From<&'a String> for StructureRef<'a> {
    fn from(id: &'a String) -> Self {
        StructureRef::Id(id)
    }
}

impl<'a> From<&'a Structure> for StructureRef<'a> {
    fn from(structure: &'a Structure) -> Self {
        StructureRef::Structure(structure)
    }
}
