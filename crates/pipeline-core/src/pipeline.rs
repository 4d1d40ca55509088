//! Event-driven pipeline stage machinery.
//!
//! An `execute` call charges one cycle for fetch and decode, then resolves the
//! first stage. Operands held in registers or immediates resolve inline within
//! that same cycle; a memory operand defers by returning the event the next
//! cycle must handle. The call drives the resulting chain with an explicit
//! loop: charge one cycle, dispatch the in-flight event, continue with the
//! handler's follow-up event, stop when none remains. The pipeline keeps no
//! state enum; its state is exactly which event variant is in flight. Chains
//! are acyclic and at most four transitions long, but the loop keeps the
//! machinery off the call stack as the ISA grows.

use crate::trace::NullSink;
use crate::{Fault, Instruction, Machine, OperandSource, PipelineEvent, TraceEvent, TraceSink};

impl Machine {
    /// Executes one instruction to completion, updating state and counters.
    ///
    /// The call fully drains the instruction's event chain before returning;
    /// there is never a second instruction in flight. Faults detected while
    /// the instruction runs are recorded as exception events and counted.
    /// They are terminal for that instruction but never fatal to the machine.
    pub fn execute(&mut self, instruction: &Instruction) {
        self.execute_with_trace(instruction, &mut NullSink);
    }

    /// Executes one instruction, reporting each step to a trace sink.
    ///
    /// Sink order is deterministic: one `InstructionIssued`, then one
    /// `EventDispatched` per handled event in dispatch order, a `FaultRaised`
    /// whenever an exception is recorded, and a final `InstructionRetired`
    /// carrying the cycles the call consumed.
    pub fn execute_with_trace(&mut self, instruction: &Instruction, sink: &mut dyn TraceSink) {
        sink.on_event(TraceEvent::InstructionIssued { instruction: *instruction });
        let issued_at = self.counters.cycle_count;

        self.counters.charge_cycle();
        let mut in_flight = self.issue(instruction);

        while let Some(event) = in_flight {
            self.counters.charge_cycle();
            sink.on_event(TraceEvent::EventDispatched { event, cycle: self.counters.cycle_count });
            in_flight = self.dispatch(event, sink);
        }

        sink.on_event(TraceEvent::InstructionRetired {
            instruction: *instruction,
            cycles: self.counters.cycle_count.saturating_sub(issued_at),
        });
    }

    /// First-stage resolution: locate the first operand.
    ///
    /// Register and immediate sources resolve within the already-charged
    /// cycle and control falls through to the second stage. A memory source
    /// defers with an `Op1Fetch` event modeling the access latency.
    fn issue(&mut self, instruction: &Instruction) -> Option<PipelineEvent> {
        let first = instruction.first_operand();
        if first.is_memory() {
            return Some(PipelineEvent::Op1Fetch { instruction: *instruction });
        }
        let op1 = self.read(first);
        self.resolve_op2(instruction, op1)
    }

    /// Second-stage resolution, entered once the first operand is known.
    ///
    /// Only binary instructions carry a genuine second operand; unary and
    /// jump instructions fall straight through to writeback with the first
    /// operand as their result. A register or immediate second operand lets
    /// the operation compute in the same cycle; a memory one defers with an
    /// `Op2Fetch` event carrying the resolved first operand along.
    fn resolve_op2(&mut self, instruction: &Instruction, op1: i32) -> Option<PipelineEvent> {
        match instruction {
            Instruction::Binary { op2, op, .. } => {
                if op2.is_memory() {
                    return Some(PipelineEvent::Op2Fetch { instruction: *instruction, op1 });
                }
                let op2 = self.read(*op2);
                self.resolve_writeback(instruction, op.apply(op1, op2))
            }
            Instruction::Unary { .. } | Instruction::Jump { .. } => {
                self.resolve_writeback(instruction, op1)
            }
        }
    }

    /// Writeback resolution: commit now or defer, by destination kind.
    ///
    /// A register destination commits within the already-charged cycle and
    /// terminates the chain. A memory destination costs one more cycle and
    /// defers with a `Writeback` event. An immediate destination is a
    /// malformed program, downgraded to a recorded exception.
    fn resolve_writeback(
        &mut self,
        instruction: &Instruction,
        result: i32,
    ) -> Option<PipelineEvent> {
        match instruction.destination() {
            OperandSource::Register(register) => {
                self.store_register(register, result);
                None
            }
            OperandSource::Memory(_) => {
                Some(PipelineEvent::Writeback { instruction: *instruction, result })
            }
            OperandSource::Immediate(_) => {
                Some(PipelineEvent::Exception { fault: Fault::InvalidWriteTarget })
            }
        }
    }

    /// Routes one charged event to its stage handler and attributes it to the
    /// matching stage counter. Exactly the events that reach this dispatch
    /// show up in the per-stage metrics.
    fn dispatch(
        &mut self,
        event: PipelineEvent,
        sink: &mut dyn TraceSink,
    ) -> Option<PipelineEvent> {
        self.counters.record_stage(event.stage());
        match event {
            PipelineEvent::Op1Fetch { instruction } => self.handle_op1_fetch(&instruction),
            PipelineEvent::Op2Fetch { instruction, op1 } => {
                self.handle_op2_fetch(&instruction, op1)
            }
            PipelineEvent::Execution { instruction, op1, op2 } => {
                Some(Self::handle_execution(&instruction, op1, op2))
            }
            PipelineEvent::Writeback { instruction, result } => {
                self.handle_writeback(&instruction, result)
            }
            PipelineEvent::Exception { fault } => {
                sink.on_event(TraceEvent::FaultRaised { fault });
                None
            }
        }
    }

    /// `Op1Fetch` handler: the deferred first operand is now readable.
    ///
    /// Binary instructions continue into second-stage resolution. Unary and
    /// jump instructions go straight to writeback resolution; a jump's fixed
    /// register destination therefore always commits in this same cycle.
    fn handle_op1_fetch(&mut self, instruction: &Instruction) -> Option<PipelineEvent> {
        let op1 = self.read(instruction.first_operand());
        match instruction {
            Instruction::Binary { .. } => self.resolve_op2(instruction, op1),
            Instruction::Unary { .. } | Instruction::Jump { .. } => {
                self.resolve_writeback(instruction, op1)
            }
        }
    }

    /// `Op2Fetch` handler: the deferred second operand is now readable.
    ///
    /// Only binary instructions may legally reach this handler. Anything else
    /// in flight here is a malformed pipeline state, recorded as an exception.
    fn handle_op2_fetch(&self, instruction: &Instruction, op1: i32) -> Option<PipelineEvent> {
        match instruction {
            Instruction::Binary { op2, .. } => {
                let op2 = self.read(*op2);
                Some(PipelineEvent::Execution { instruction: *instruction, op1, op2 })
            }
            Instruction::Unary { .. } | Instruction::Jump { .. } => {
                Some(PipelineEvent::Exception { fault: Fault::MalformedPipelineState })
            }
        }
    }

    /// `Execution` handler: apply the operation to fully resolved operands.
    ///
    /// Touches no machine state, never stalls, and always produces exactly
    /// one writeback event.
    const fn handle_execution(instruction: &Instruction, op1: i32, op2: i32) -> PipelineEvent {
        let result = match instruction {
            Instruction::Binary { op, .. } => op.apply(op1, op2),
            Instruction::Unary { .. } | Instruction::Jump { .. } => op1,
        };
        PipelineEvent::Writeback { instruction: *instruction, result }
    }

    /// `Writeback` handler: commit a deferred result through the write
    /// indirection. An immediate destination surfaces here as the recorded
    /// invalid-write-target exception.
    fn handle_writeback(
        &mut self,
        instruction: &Instruction,
        result: i32,
    ) -> Option<PipelineEvent> {
        match self.write(instruction.destination(), result) {
            Ok(()) => None,
            Err(fault) => Some(PipelineEvent::Exception { fault }),
        }
    }
}
