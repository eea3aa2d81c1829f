use kernel_pipe::{error::ZeroCapacity, Pipe};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

#[test]
fn new_pipe_is_empty() {
    for capacity in 1..10 {
        let pipe = Pipe::<i32>::new(capacity);
        assert_eq!(pipe.capacity(), capacity);
        assert_eq!(pipe.size(), 0);
        assert!(pipe.is_empty());
        assert!(!pipe.is_full());
    }
}

#[test]
fn zero_capacity() {
    assert_eq!(Pipe::<i32>::try_new(0).err(), Some(ZeroCapacity));
    assert!(Pipe::<i32>::try_new(1).is_ok());
}

#[test]
#[should_panic]
fn zero_capacity_panics() {
    Pipe::<i32>::new(0);
}

#[test]
fn wrap_around() {
    let pipe = Pipe::new(2);
    let mut value = 0;

    assert!(pipe.write(&10));
    assert!(pipe.read(&mut value));
    assert_eq!(value, 10);

    assert!(pipe.write(&20));
    assert!(pipe.write(&30));
    assert!(pipe.is_full());
    assert!(pipe.read(&mut value));
    assert_eq!(value, 20);
    assert!(pipe.read(&mut value));
    assert_eq!(value, 30);

    // A failed read leaves the output untouched
    assert!(!pipe.read(&mut value));
    assert_eq!(value, 30);
    assert!(pipe.is_empty());
}

#[test]
fn full_write_returns_value() {
    let pipe = Pipe::new(1);
    assert!(pipe.try_write(String::from("a")).is_ok());
    let rejected = pipe.try_write(String::from("b")).unwrap_err();
    assert_eq!(rejected.into_inner(), "b");
    assert_eq!(pipe.size(), 1);
    assert_eq!(pipe.try_read().unwrap(), "a");
    assert!(pipe.try_read().is_err());
}

#[test]
fn would_block_maps_to_io() {
    let pipe = Pipe::new(1);
    pipe.try_write(1).unwrap();
    let full: std::io::Error = pipe.try_write(2).unwrap_err().into();
    assert_eq!(full.kind(), std::io::ErrorKind::WouldBlock);
    pipe.try_read().unwrap();
    let empty: std::io::Error = pipe.try_read().unwrap_err().into();
    assert_eq!(empty.kind(), std::io::ErrorKind::WouldBlock);
    let invalid: std::io::Error = Pipe::<i32>::try_new(0).unwrap_err().into();
    assert_eq!(invalid.kind(), std::io::ErrorKind::InvalidInput);
}

// Compare a random sequence of operations against a model queue.
#[test]
fn random_operations_match_model() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for capacity in 1..8 {
        let pipe = Pipe::new(capacity);
        let mut model = VecDeque::new();
        let mut next = 0u64;
        for _ in 0..2000 {
            let size = pipe.size();
            if rng.gen_bool(0.5) {
                let written = pipe.write(&next);
                assert_eq!(written, model.len() < capacity);
                if written {
                    model.push_back(next);
                    assert_eq!(pipe.size(), size + 1);
                } else {
                    assert_eq!(pipe.size(), size);
                }
                next += 1;
            } else {
                let mut value = u64::MAX;
                let read = pipe.read(&mut value);
                assert_eq!(read, !model.is_empty());
                if read {
                    assert_eq!(Some(value), model.pop_front());
                    assert_eq!(pipe.size(), size - 1);
                } else {
                    assert_eq!(value, u64::MAX);
                    assert_eq!(pipe.size(), size);
                }
            }
            assert_eq!(pipe.size(), model.len());
            assert_eq!(pipe.is_empty(), pipe.size() == 0);
            assert_eq!(pipe.is_full(), pipe.size() == pipe.capacity());
        }
    }
}

struct Counted(Arc<AtomicUsize>);

impl Drop for Counted {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn drop_remaining_elements() {
    let drops = Arc::new(AtomicUsize::new(0));
    let pipe = Pipe::new(2);
    assert!(pipe.try_write(Counted(drops.clone())).is_ok());
    assert!(pipe.try_write(Counted(drops.clone())).is_ok());
    assert_eq!(drops.load(Ordering::Relaxed), 0);
    drop(pipe);
    assert_eq!(drops.load(Ordering::Relaxed), 2);
}

struct PanicOnDrop(Arc<AtomicUsize>);

impl Drop for PanicOnDrop {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::Relaxed);
        panic!("drop failed");
    }
}

#[test]
fn panicking_drop_does_not_leak_remaining_elements() {
    let drops = Arc::new(AtomicUsize::new(0));
    let pipe: Pipe<Box<dyn Send>> = Pipe::new(3);
    assert!(pipe.try_write(Box::new(PanicOnDrop(drops.clone()))).is_ok());
    assert!(pipe.try_write(Box::new(Counted(drops.clone()))).is_ok());
    assert!(pipe.try_write(Box::new(Counted(drops.clone()))).is_ok());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| drop(pipe)));
    assert!(result.is_err());
    assert_eq!(drops.load(Ordering::Relaxed), 3);
}

#[test]
fn drop_strings() {
    let pipe = Pipe::new(2);
    assert!(pipe.write(&String::from("a")));
    assert!(pipe.write(&String::from("b")));
    drop(pipe);
}

#[test]
fn read_elements_are_not_dropped_twice() {
    let drops = Arc::new(AtomicUsize::new(0));
    let pipe = Pipe::new(3);
    for _ in 0..3 {
        assert!(pipe.try_write(Counted(drops.clone())).is_ok());
    }
    let first = pipe.try_read().ok();
    assert!(first.is_some());
    assert!(pipe.try_write(Counted(drops.clone())).is_ok());
    assert_eq!(drops.load(Ordering::Relaxed), 0);

    drop(first);
    assert_eq!(drops.load(Ordering::Relaxed), 1);
    drop(pipe);
    assert_eq!(drops.load(Ordering::Relaxed), 4);
}

#[derive(Debug)]
struct PanicOnClone;

impl Clone for PanicOnClone {
    fn clone(&self) -> Self {
        panic!("clone failed")
    }
}

#[test]
fn panicking_clone_leaves_pipe_unchanged() {
    let pipe = Pipe::new(2);
    assert!(pipe.try_write(PanicOnClone).is_ok());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pipe.write(&PanicOnClone);
    }));
    assert!(result.is_err());

    // The pipe is still usable and holds only the first element
    assert_eq!(pipe.size(), 1);
    assert!(pipe.try_write(PanicOnClone).is_ok());
    assert!(pipe.is_full());
}

#[test]
fn debug_format() {
    let pipe = Pipe::new(3);
    pipe.try_write(1u8).unwrap();
    let formatted = format!("{:?}", pipe);
    assert!(formatted.contains("capacity: 3"));
    assert!(formatted.contains("size: 1"));
}

#[test]
fn ids_are_unique() {
    let a = Pipe::<u8>::new(1);
    let b = Pipe::<u8>::new(1);
    assert_ne!(a.id(), b.id());
    assert!(a.id().to_string().starts_with("pipe#"));
}
