use std::{thread, time::Duration};

use utils::timer::{as_millis_f64, Timer};

#[test]
fn test_timer() {
    let block_1 = Timer::new("block 1", true);
    let block_2 = Timer::new("block 2", true);
    thread::sleep(Duration::from_millis(20));
    let block_3 = Timer::new("block 3", false);
    block_3.print("Some extra information from block 3");
    thread::sleep(Duration::from_millis(10));

    let inner = block_3.stop();
    let middle = block_2.stop();
    let outer = block_1.stop();

    assert!(inner >= Duration::from_millis(10));
    assert!(middle >= inner);
    assert!(outer >= middle);
    assert_eq!(block_1.label(), "block 1");
    assert!(!block_3.is_root());
}

#[test]
fn test_millis_conversion() {
    assert_eq!(as_millis_f64(Duration::from_millis(3)), 3.0);
    assert_eq!(as_millis_f64(Duration::from_micros(1_500)), 1.5);
    assert_eq!(as_millis_f64(Duration::ZERO), 0.0);
}
