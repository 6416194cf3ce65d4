use std::{
    sync::{mpsc, Arc, Barrier},
    thread,
    time::Duration,
};

use super::WorkerPool;
use crate::service::error::DevicePopError;

const RECV_TIMEOUT: Duration = Duration::from_secs(10);

#[test]
fn test_zero_sized_pool_is_rejected() {
    let result = WorkerPool::new(0);

    assert!(matches!(
        result,
        Err(DevicePopError::WorkerPoolUnavailable(_))
    ));
}

#[test]
fn test_submit_and_wait() {
    let pool = WorkerPool::new(1).unwrap();

    let result = pool.submit(|| 40 + 2).wait().unwrap();

    assert_eq!(42, result);
    assert_eq!(1, pool.size());
}

#[test]
fn test_wait_inside_async_runtime() {
    let pool = WorkerPool::new(1).unwrap();

    for runtime in [
        tokio::runtime::Builder::new_current_thread().build().unwrap(),
        tokio::runtime::Builder::new_multi_thread().build().unwrap(),
    ] {
        let result = runtime.block_on(async { pool.submit(|| 40 + 2).wait() });
        assert_eq!(42, result.unwrap());
    }
}

#[test]
fn test_join_from_async_caller() {
    let pool = WorkerPool::new(1).unwrap();
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

    let result = runtime.block_on(pool.submit(|| "done").join());

    assert_eq!("done", result.unwrap());
}

#[test]
fn test_tasks_beyond_pool_size_queue_up() {
    let pool = WorkerPool::new(1).unwrap();

    let handles: Vec<_> = (0..4).map(|i| pool.submit(move || i * 10)).collect();
    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.wait().unwrap())
        .collect();

    assert_eq!(vec![0, 10, 20, 30], results);
}

#[test]
fn test_tasks_run_concurrently_up_to_pool_size() {
    let pool = WorkerPool::new(2).unwrap();
    let barrier = Arc::new(Barrier::new(2));
    let (sender, receiver) = mpsc::channel();

    for _ in 0..2 {
        let barrier = barrier.clone();
        let sender = sender.clone();
        pool.execute(
            move || {
                barrier.wait();
                Ok(())
            },
            move |result| sender.send(result.is_ok()).unwrap(),
        );
    }

    assert!(receiver.recv_timeout(RECV_TIMEOUT).unwrap());
    assert!(receiver.recv_timeout(RECV_TIMEOUT).unwrap());
}

#[test]
fn test_callback_runs_on_pool_thread() {
    let pool = WorkerPool::new(1).unwrap();
    let (sender, receiver) = mpsc::channel();

    pool.execute(
        || Ok("done"),
        move |result| {
            sender
                .send((result.unwrap(), thread::current().name().map(str::to_owned)))
                .unwrap()
        },
    );

    let (value, thread_name) = receiver.recv_timeout(RECV_TIMEOUT).unwrap();
    assert_eq!("done", value);
    assert_eq!(Some("device-pop-worker".to_owned()), thread_name);
}

#[test]
fn test_callback_receives_task_error() {
    let pool = WorkerPool::new(1).unwrap();
    let (sender, receiver) = mpsc::channel();

    pool.execute(
        || Err::<(), _>(DevicePopError::KeyMissing("microsoft-device-pop".to_owned())),
        move |result| sender.send(result).unwrap(),
    );

    let result = receiver.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(matches!(result, Err(DevicePopError::KeyMissing(_))));
    assert!(receiver.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn test_callback_invoked_once_when_task_panics() {
    let pool = WorkerPool::new(1).unwrap();
    let (sender, receiver) = mpsc::channel();

    pool.execute(
        || -> Result<(), DevicePopError> { panic!("task failure") },
        move |result| sender.send(result).unwrap(),
    );

    let result = receiver.recv_timeout(RECV_TIMEOUT).unwrap();
    assert!(matches!(
        result,
        Err(DevicePopError::InterruptedWhileWaiting)
    ));
    assert!(receiver.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn test_wait_after_panic_is_interrupted() {
    let pool = WorkerPool::new(1).unwrap();

    let result = pool.submit(|| -> u8 { panic!("task failure") }).wait();

    assert!(matches!(
        result,
        Err(DevicePopError::InterruptedWhileWaiting)
    ));
}

#[test]
fn test_shutdown_lets_running_task_finish() {
    let pool = WorkerPool::new(1).unwrap();
    let (started_sender, started_receiver) = mpsc::channel();
    let (sender, receiver) = mpsc::channel();

    pool.execute(
        move || {
            started_sender.send(()).unwrap();
            thread::sleep(Duration::from_millis(50));
            Ok(7)
        },
        move |result| sender.send(result.unwrap()).unwrap(),
    );
    started_receiver.recv_timeout(RECV_TIMEOUT).unwrap();
    pool.shutdown(Duration::from_secs(5));

    assert_eq!(7, receiver.recv_timeout(RECV_TIMEOUT).unwrap());
}
