//! Stream synchronizers: align independent input streams into tuples.
//!
//! Two termination policies cover every adapter in the crate:
//!
//! - **All-mandatory** ([`Zip2`], [`Zip3`]): one value is pulled from every
//!   stream per round, in declared order. The first end-of-stream ends the
//!   pairing immediately; values already pulled that round are discarded and
//!   no partial tuple is emitted.
//! - **Primary/auxiliary** ([`GatedZip2`]): the primary stream drives. It is
//!   pulled first each round, so when it ends the auxiliary is never touched
//!   again; the auxiliary gates each primary element and its end terminates
//!   the whole pairing.
//!
//! Both are fused, one-shot sequences: after the terminal observation no
//! partner stream is polled again, so a stream that misbehaves after its
//! partner ended is simply never read.

use crate::flow::packet::Packet;
use crate::flow::port::InputPort;

/// End-of-stream bookkeeping for a two-stream pairing.
///
/// Components that hold pairing state across `process()` calls track it with
/// this machine instead of loose booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairState {
    BothOpen,
    LeftEnded,
    RightEnded,
    BothEnded,
}

impl PairState {
    /// Record that the left stream reported end-of-stream.
    pub fn left_ended(self) -> Self {
        match self {
            PairState::BothOpen | PairState::LeftEnded => PairState::LeftEnded,
            PairState::RightEnded | PairState::BothEnded => PairState::BothEnded,
        }
    }

    /// Record that the right stream reported end-of-stream.
    pub fn right_ended(self) -> Self {
        match self {
            PairState::BothOpen | PairState::RightEnded => PairState::RightEnded,
            PairState::LeftEnded | PairState::BothEnded => PairState::BothEnded,
        }
    }

    pub fn left_open(self) -> bool {
        matches!(self, PairState::BothOpen | PairState::RightEnded)
    }

    pub fn right_open(self) -> bool {
        matches!(self, PairState::BothOpen | PairState::LeftEnded)
    }

    /// Terminal: both streams have ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, PairState::BothEnded)
    }
}

/// All-mandatory zip over two streams.
pub struct Zip2<'a, A, B> {
    left: &'a mut InputPort<A>,
    right: &'a mut InputPort<B>,
    done: bool,
}

impl<'a, A, B> Zip2<'a, A, B> {
    pub fn new(left: &'a mut InputPort<A>, right: &'a mut InputPort<B>) -> Self {
        Self {
            left,
            right,
            done: false,
        }
    }
}

impl<A, B> Iterator for Zip2<'_, A, B> {
    type Item = (A, B);

    fn next(&mut self) -> Option<(A, B)> {
        if self.done {
            return None;
        }
        let a = match self.left.receive() {
            Packet::Value(a) => a,
            Packet::EndOfStream => {
                self.done = true;
                return None;
            }
        };
        match self.right.receive() {
            Packet::Value(b) => Some((a, b)),
            Packet::EndOfStream => {
                // `a` is discarded: no partial tuple
                self.done = true;
                None
            }
        }
    }
}

/// All-mandatory zip over three streams.
pub struct Zip3<'a, A, B, C> {
    first: &'a mut InputPort<A>,
    second: &'a mut InputPort<B>,
    third: &'a mut InputPort<C>,
    done: bool,
}

impl<'a, A, B, C> Zip3<'a, A, B, C> {
    pub fn new(
        first: &'a mut InputPort<A>,
        second: &'a mut InputPort<B>,
        third: &'a mut InputPort<C>,
    ) -> Self {
        Self {
            first,
            second,
            third,
            done: false,
        }
    }
}

impl<A, B, C> Iterator for Zip3<'_, A, B, C> {
    type Item = (A, B, C);

    fn next(&mut self) -> Option<(A, B, C)> {
        if self.done {
            return None;
        }
        let a = match self.first.receive() {
            Packet::Value(a) => a,
            Packet::EndOfStream => {
                self.done = true;
                return None;
            }
        };
        let b = match self.second.receive() {
            Packet::Value(b) => b,
            Packet::EndOfStream => {
                self.done = true;
                return None;
            }
        };
        match self.third.receive() {
            Packet::Value(c) => Some((a, b, c)),
            Packet::EndOfStream => {
                self.done = true;
                None
            }
        }
    }
}

/// Primary/auxiliary zip: the auxiliary stream gates the primary.
pub struct GatedZip2<'a, P, G> {
    primary: &'a mut InputPort<P>,
    gate: &'a mut InputPort<G>,
    state: PairState,
}

impl<'a, P, G> GatedZip2<'a, P, G> {
    pub fn new(primary: &'a mut InputPort<P>, gate: &'a mut InputPort<G>) -> Self {
        Self {
            primary,
            gate,
            state: PairState::BothOpen,
        }
    }

    /// Which side ended the pairing, once it is over.
    pub fn state(&self) -> PairState {
        self.state
    }
}

impl<P, G> Iterator for GatedZip2<'_, P, G> {
    type Item = (P, G);

    fn next(&mut self) -> Option<(P, G)> {
        if self.state != PairState::BothOpen {
            return None;
        }
        let p = match self.primary.receive() {
            Packet::Value(p) => p,
            Packet::EndOfStream => {
                // primary drives termination; the gate is not polled again
                self.state = self.state.left_ended();
                return None;
            }
        };
        match self.gate.receive() {
            Packet::Value(g) => Some((p, g)),
            Packet::EndOfStream => {
                // gate exhausted: the whole pairing ends, `p` is discarded
                self.state = self.state.right_ended();
                None
            }
        }
    }
}
