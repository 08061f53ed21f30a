//! Delivery of replayed frames to consumers.

use crate::error::ReplayError;
use crate::frame::ReplayFrame;
use std::sync::mpsc::{self, Receiver, Sender};

/// Boundary to whatever transport carries frames downstream.
pub trait SampleEmitter {
    fn emit(&mut self, frame: ReplayFrame) -> Result<(), ReplayError>;
}

impl<E: SampleEmitter + ?Sized> SampleEmitter for Box<E> {
    fn emit(&mut self, frame: ReplayFrame) -> Result<(), ReplayError> {
        (**self).emit(frame)
    }
}

/// Sends frames over a channel to a subscriber.
#[derive(Debug, Clone)]
pub struct ChannelEmitter {
    sender: Sender<ReplayFrame>,
}

impl ChannelEmitter {
    /// Create an emitter together with the receiving end.
    pub fn new() -> (Self, Receiver<ReplayFrame>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl SampleEmitter for ChannelEmitter {
    fn emit(&mut self, frame: ReplayFrame) -> Result<(), ReplayError> {
        self.sender
            .send(frame)
            .map_err(|_| ReplayError::Emit("Frame receiver was dropped".to_string()))
    }
}

/// Calls a closure for every frame.
pub struct FnEmitter<F> {
    callback: F,
}

impl<F> FnEmitter<F>
where
    F: FnMut(ReplayFrame) -> Result<(), ReplayError>,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> SampleEmitter for FnEmitter<F>
where
    F: FnMut(ReplayFrame) -> Result<(), ReplayError>,
{
    fn emit(&mut self, frame: ReplayFrame) -> Result<(), ReplayError> {
        (self.callback)(frame)
    }
}
