use std::fmt;

use crate::gate::GateKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IoKind {
    Input,
    Output,
}

impl From<IoKind> for GateKind {
    fn from(io: IoKind) -> Self {
        match io {
            IoKind::Input => GateKind::Input,
            IoKind::Output => GateKind::Output,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Blank,
    Running,
    Ticking,
    PlacingComponent(GateKind),
    RemovingComponent,
    AddingWire,
    RoutingWire,
    RemovingWire,
    PlacingIo(IoKind),
}

impl Mode {
    pub fn readable(&self) -> &'static str {
        match self {
            Mode::Blank => "Blank",
            Mode::Running => "Running",
            Mode::Ticking => "Ticking",
            Mode::PlacingComponent(_) => "Placing component",
            Mode::RemovingComponent => "Removing component",
            Mode::AddingWire => "Adding wire",
            Mode::RoutingWire => "Routing wire",
            Mode::RemovingWire => "Removing wire",
            Mode::PlacingIo(_) => "Placing I/O",
        }
    }

    pub fn is_simulating(&self) -> bool {
        matches!(self, Mode::Running | Mode::Ticking)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.readable())
    }
}

type Listener = Box<dyn FnMut(&Mode, &Mode)>;

#[derive(Default)]
pub struct ModeMachine {
    mode: Mode,
    listeners: Vec<Listener>,
}

impl ModeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Mode, &Mode) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn transition(&mut self, next: Mode) -> bool {
        if next == self.mode {
            return false;
        }
        let old = std::mem::replace(&mut self.mode, next);
        tracing::debug!(from = %old, to = %self.mode, "mode change");
        for listener in self.listeners.iter_mut() {
            listener(&old, &self.mode);
        }
        true
    }

    pub fn reset(&mut self) -> bool {
        self.transition(Mode::Blank)
    }
}

impl fmt::Debug for ModeMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeMachine")
            .field("mode", &self.mode)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
