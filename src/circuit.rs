use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    gate::{GateKind, Source},
    library::Library,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: GateKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<Source>,
    #[serde(flatten)]
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub from: usize,
    pub to: usize,
    pub slot: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Point>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub const MIN_SIDE: i32 = 3;

    pub fn new(width: i32, height: i32) -> Self {
        Grid {
            width: width.max(Self::MIN_SIDE),
            height: height.max(Self::MIN_SIDE),
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub wires: Vec<Wire>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn component(&self, index: usize) -> Result<&Component> {
        self.components
            .get(index)
            .ok_or(Error::InvalidComponent(index))
    }

    pub fn component_at(&self, position: Position) -> Option<usize> {
        self.components
            .iter()
            .position(|component| component.position == position)
    }

    pub fn fitted_grid(&self) -> Grid {
        let points = self
            .wires
            .iter()
            .flat_map(|wire| wire.path.iter())
            .map(|point| (point.x.ceil() as i32, point.y.ceil() as i32));
        let (width, height) = self
            .components
            .iter()
            .map(|component| (component.position.x, component.position.y))
            .chain(points)
            .fold((0, 0), |(w, h), (x, y)| (w.max(x + 1), h.max(y + 1)));
        Grid::new(width, height)
    }

    pub fn resize_grid(&mut self, grid: Grid) -> Result<()> {
        if let Some(outside) = self
            .components
            .iter()
            .find(|component| !grid.contains(component.position))
        {
            return Err(Error::OutOfGrid {
                x: outside.position.x,
                y: outside.position.y,
            });
        }
        self.grid = Some(grid);
        Ok(())
    }

    pub fn input_count(&self) -> usize {
        self.components
            .iter()
            .filter(|component| component.kind == GateKind::Input)
            .count()
    }

    pub fn output_count(&self) -> usize {
        self.components
            .iter()
            .filter(|component| component.kind == GateKind::Output)
            .count()
    }

    pub fn add_component(
        &mut self,
        library: &Library,
        kind: GateKind,
        position: Position,
    ) -> Result<usize> {
        let inside = match self.grid {
            Some(grid) => grid.contains(position),
            None => position.x >= 0 && position.y >= 0,
        };
        if !inside {
            return Err(Error::OutOfGrid {
                x: position.x,
                y: position.y,
            });
        }
        if self.component_at(position).is_some() {
            return Err(Error::PositionOccupied {
                x: position.x,
                y: position.y,
            });
        }
        let arity = library.arity(&kind)?;
        self.components.push(Component {
            kind,
            inputs: vec![Source::Unset; arity],
            position,
        });
        Ok(self.components.len() - 1)
    }

    /// Wires the output of `from` into `slot` of `to`, replacing any wire
    /// already feeding that slot. Returns the index of the new wire.
    pub fn connect(&mut self, from: usize, to: usize, slot: usize) -> Result<usize> {
        if self.component(from)?.kind == GateKind::Output {
            return Err(Error::NoOutputPort(from));
        }
        let receiver = self
            .components
            .get_mut(to)
            .ok_or(Error::InvalidComponent(to))?;
        let arity = receiver.inputs.len();
        let input = receiver.inputs.get_mut(slot).ok_or(Error::InvalidSlot {
            component: to,
            slot,
            arity,
        })?;
        *input = Source::Component(from);

        self.wires
            .retain(|wire| !(wire.to == to && wire.slot == slot));
        self.wires.push(Wire {
            from,
            to,
            slot,
            path: Vec::new(),
        });
        Ok(self.wires.len() - 1)
    }

    pub fn disconnect(&mut self, wire: usize) -> Result<Wire> {
        if wire >= self.wires.len() {
            return Err(Error::InvalidWire(wire));
        }
        let removed = self.wires.remove(wire);
        if let Some(input) = self
            .components
            .get_mut(removed.to)
            .and_then(|component| component.inputs.get_mut(removed.slot))
        {
            if *input == Source::Component(removed.from) {
                *input = Source::Unset;
            }
        }
        Ok(removed)
    }

    pub fn route_wire(&mut self, wire: usize, path: Vec<Point>) -> Result<()> {
        let wire = self
            .wires
            .get_mut(wire)
            .ok_or(Error::InvalidWire(wire))?;
        wire.path = path;
        Ok(())
    }

    /// Removes a component together with every wire touching it. Slots it
    /// fed become unset and later component indices shift down by one.
    pub fn remove_component(&mut self, index: usize) -> Result<Component> {
        self.component(index)?;
        let removed = self.components.remove(index);

        for component in self.components.iter_mut() {
            for input in component.inputs.iter_mut() {
                *input = match *input {
                    Source::Component(i) if i == index => Source::Unset,
                    Source::Component(i) if i > index => Source::Component(i - 1),
                    other => other,
                };
            }
        }

        self.wires
            .retain(|wire| wire.from != index && wire.to != index);
        for wire in self.wires.iter_mut() {
            if wire.from > index {
                wire.from -= 1;
            }
            if wire.to > index {
                wire.to -= 1;
            }
        }
        Ok(removed)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
