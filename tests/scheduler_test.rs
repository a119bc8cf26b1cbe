/*!
 * Scheduler Tests
 * Ready-queue order and quantum stamping for both policies
 */

use pretty_assertions::assert_eq;
use scheduling_kernel::program::Program;
use scheduling_kernel::{
    policy_for, FirstComeFirstServed, PolicyKind, ProcessId, ProcessTable, Quantum, RoundRobin,
    SchedulingPolicy, Selection,
};
use std::sync::Arc;

fn table_with(n: usize) -> ProcessTable {
    let mut table = ProcessTable::new(Arc::new(Program::idle()));
    let program = Arc::new(Program::parse("p", "x = 1").unwrap());
    for i in 0..n {
        table.allocate(format!("p{}", i), Arc::clone(&program), 0);
    }
    table
}

fn drain(policy: &mut dyn SchedulingPolicy, table: &mut ProcessTable) -> Vec<u32> {
    let mut order = Vec::new();
    while let Selection::Ready(pid) = policy.next_process(table) {
        order.push(pid);
    }
    order
}

#[test]
fn test_fcfs_serves_in_arrival_order() {
    let mut table = table_with(3);
    let mut policy = FirstComeFirstServed::new();

    policy.add_process(ProcessId::User(2));
    policy.add_process(ProcessId::User(1));
    policy.add_process(ProcessId::User(3));

    assert_eq!(policy.ready_len(), 3);
    assert_eq!(drain(&mut policy, &mut table), vec![2, 1, 3]);
}

#[test]
fn test_fcfs_empty_selects_idle() {
    let mut table = table_with(1);
    let mut policy = FirstComeFirstServed::new();

    assert_eq!(policy.next_process(&mut table), Selection::Idle);
    assert!(!policy.is_preemptive());
    assert!(!policy.reschedule_after_interrupt());
}

#[test]
fn test_fcfs_ignores_idle_process() {
    let mut table = table_with(1);
    let mut policy = FirstComeFirstServed::new();

    policy.add_process(ProcessId::Idle);
    assert_eq!(policy.ready_len(), 0);
    assert_eq!(policy.next_process(&mut table), Selection::Idle);
}

#[test]
fn test_round_robin_order_with_requeue() {
    let mut table = table_with(3);
    let mut policy = RoundRobin::new(Quantum::new(2).unwrap());

    for pid in 1..=3 {
        policy.add_process(ProcessId::User(pid));
    }

    // Take the head and put it back behind the others
    let first = policy.next_process(&mut table);
    assert_eq!(first, Selection::Ready(1));
    policy.add_process(ProcessId::User(1));

    assert_eq!(drain(&mut policy, &mut table), vec![2, 3, 1]);
}

#[test]
fn test_round_robin_stamps_quantum_on_selection() {
    let mut table = table_with(2);
    let mut policy = RoundRobin::new(Quantum::new(5).unwrap());
    policy.add_process(ProcessId::User(2));

    assert_eq!(policy.next_process(&mut table), Selection::Ready(2));
    assert_eq!(table.get(ProcessId::User(2)).unwrap().quantum, 5);
    // Not selected, not stamped
    assert_eq!(table.get(ProcessId::User(1)).unwrap().quantum, 0);
}

#[test]
fn test_round_robin_empty_is_exhausted() {
    let mut table = table_with(0);
    let mut policy = RoundRobin::default();

    assert_eq!(policy.next_process(&mut table), Selection::Exhausted);
    assert!(policy.is_preemptive());
    assert!(policy.reschedule_after_interrupt());
}

#[test]
fn test_policy_for_builds_requested_kind() {
    let quantum = Quantum::new(3).unwrap();

    let fcfs = policy_for(PolicyKind::FirstComeFirstServed, quantum);
    assert_eq!(fcfs.kind(), PolicyKind::FirstComeFirstServed);
    assert_eq!(fcfs.quantum(), None);

    let rr = policy_for(PolicyKind::RoundRobin, quantum);
    assert_eq!(rr.kind(), PolicyKind::RoundRobin);
    assert_eq!(rr.quantum(), Some(quantum));
}
