//! Sustrato de prueba: conexiones que graban lo que se les escribe,
//! fuentes de señales con guion y un listener con conexiones pre-cargadas.

use super::{Connection, Listener, SignalBinder, SignalSource};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::net::SocketAddr;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Write {
        bytes: Vec<u8>,
        congestion_control: bool,
    },
    Toggle(bool),
    Close,
}

#[derive(Debug, Default)]
pub struct ConnLog {
    pub events: Vec<Event>,
}

impl ConnLog {
    /// Todo lo escrito, concatenado
    pub fn written(&self) -> Vec<u8> {
        self.writes().into_iter().flat_map(|(bytes, _)| bytes).collect()
    }

    /// Cada escritura con el estado del flag en ese momento
    pub fn writes(&self) -> Vec<(Vec<u8>, bool)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Write { bytes, congestion_control } => Some((bytes.clone(), *congestion_control)),
                _ => None,
            })
            .collect()
    }

    pub fn toggles(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Toggle(enabled) => Some(*enabled),
                _ => None,
            })
            .collect()
    }

    pub fn closed(&self) -> bool {
        self.events.contains(&Event::Close)
    }
}

pub struct MockConnection {
    request: Result<Vec<u8>, io::ErrorKind>,
    congestion_control: bool,
    fail_writes_after: Option<usize>,
    fail_toggles: bool,
    writes: usize,
    log: Rc<RefCell<ConnLog>>,
}

impl MockConnection {
    pub fn with_request(request: &[u8]) -> (Self, Rc<RefCell<ConnLog>>) {
        Self::build(Ok(request.to_vec()))
    }

    pub fn failing_recv() -> (Self, Rc<RefCell<ConnLog>>) {
        Self::build(Err(io::ErrorKind::ConnectionReset))
    }

    fn build(request: Result<Vec<u8>, io::ErrorKind>) -> (Self, Rc<RefCell<ConnLog>>) {
        let log = Rc::new(RefCell::new(ConnLog::default()));
        let conn = Self {
            request,
            congestion_control: true,
            fail_writes_after: None,
            fail_toggles: false,
            writes: 0,
            log: Rc::clone(&log),
        };
        (conn, log)
    }

    /// Las escrituras posteriores a las primeras `n` fallan
    pub fn fail_writes_after(mut self, n: usize) -> Self {
        self.fail_writes_after = Some(n);
        self
    }

    pub fn fail_toggles(mut self) -> Self {
        self.fail_toggles = true;
        self
    }

    pub fn starting_disabled(mut self) -> Self {
        self.congestion_control = false;
        self
    }
}

impl Connection for MockConnection {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &self.request {
            Ok(bytes) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Err(kind) => Err(io::Error::from(*kind)),
        }
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        if self.fail_writes_after.is_some_and(|limit| self.writes >= limit) {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        self.writes += 1;
        self.log.borrow_mut().events.push(Event::Write {
            bytes: data.to_vec(),
            congestion_control: self.congestion_control,
        });
        Ok(())
    }

    fn congestion_control_enabled(&self) -> bool {
        self.congestion_control
    }

    fn set_congestion_control(&mut self, enabled: bool) -> io::Result<()> {
        if self.fail_toggles {
            return Err(io::Error::from(io::ErrorKind::Unsupported));
        }
        self.congestion_control = enabled;
        self.log.borrow_mut().events.push(Event::Toggle(enabled));
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.log.borrow_mut().events.push(Event::Close);
        Ok(())
    }

    fn peer(&self) -> String {
        "mock:1".to_string()
    }
}

/// Estado compartido entre un `ScriptedBinder` y sus fuentes
#[derive(Default)]
struct SignalState {
    /// Resultado de cada poll, en orden; agotado el guion, 0
    script: RefCell<VecDeque<Result<usize, io::ErrorKind>>>,
    active: Cell<usize>,
    binds: Cell<usize>,
    polls: Cell<usize>,
}

/// Binder que modela un puerto fijo: un segundo bind mientras haya una
/// fuente viva falla con `AddrInUse`
#[derive(Clone, Default)]
pub struct ScriptedBinder {
    state: Rc<SignalState>,
    fail: bool,
}

impl ScriptedBinder {
    pub fn new(script: &[usize]) -> Self {
        let binder = Self::default();
        binder.state.script.borrow_mut().extend(script.iter().map(|&n| Ok(n)));
        binder
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn push_error(&self, kind: io::ErrorKind) {
        self.state.script.borrow_mut().push_back(Err(kind));
    }

    pub fn active(&self) -> usize {
        self.state.active.get()
    }

    pub fn binds(&self) -> usize {
        self.state.binds.get()
    }

    pub fn polls(&self) -> usize {
        self.state.polls.get()
    }
}

impl SignalBinder for ScriptedBinder {
    type Source = ScriptedSource;

    fn bind(&self, port: u16) -> io::Result<ScriptedSource> {
        if self.fail || (port != 0 && self.state.active.get() > 0) {
            return Err(io::Error::from(io::ErrorKind::AddrInUse));
        }
        self.state.active.set(self.state.active.get() + 1);
        self.state.binds.set(self.state.binds.get() + 1);
        Ok(ScriptedSource {
            state: Rc::clone(&self.state),
            port: if port == 0 { 40000 } else { port },
        })
    }
}

pub struct ScriptedSource {
    state: Rc<SignalState>,
    port: u16,
}

impl SignalSource for ScriptedSource {
    fn poll(&mut self) -> io::Result<usize> {
        self.state.polls.set(self.state.polls.get() + 1);
        match self.state.script.borrow_mut().pop_front() {
            Some(Ok(n)) => Ok(n),
            Some(Err(kind)) => Err(io::Error::from(kind)),
            None => Ok(0),
        }
    }

    fn local_port(&self) -> u16 {
        self.port
    }
}

impl Drop for ScriptedSource {
    fn drop(&mut self) {
        self.state.active.set(self.state.active.get() - 1);
    }
}

/// Entrega las conexiones cargadas y luego falla el accept
pub struct ScriptedListener {
    pending: VecDeque<MockConnection>,
}

impl ScriptedListener {
    pub fn new(connections: Vec<MockConnection>) -> Self {
        Self {
            pending: connections.into(),
        }
    }
}

impl Listener for ScriptedListener {
    type Conn = MockConnection;

    fn accept(&mut self) -> io::Result<MockConnection> {
        self.pending
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::ConnectionAborted))
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        Ok(SocketAddr::from(([127, 0, 0, 1], 0)))
    }
}
