use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use vm_diagnostics::{log_info, vm_printf, AllCategories, LogSignal, VM_DIAGNOSTICS};

#[test]
pub fn sink_prints_while_a_writer_is_queued() {
    {
        let mut diagnostics = VM_DIAGNOSTICS.write();
        diagnostics.set_vm_output_stream(Some(Box::new(std::io::sink())));
        diagnostics.set_should_log(Some(Box::new(AllCategories)));
        diagnostics.set_logger(Some(Box::new(|signal: LogSignal| {
            // give the writer below time to queue up
            thread::sleep(Duration::from_millis(300));
            vm_printf!("{}", signal.message).unwrap();
        })));
    }

    let (sender, receiver) = mpsc::channel();
    let emitter = thread::spawn(move || {
        log_info!("hello");
        sender.send(()).unwrap();
    });

    thread::sleep(Duration::from_millis(100));
    let writer = thread::spawn(|| {
        let mut diagnostics = VM_DIAGNOSTICS.write();
        diagnostics.set_logger(None);
    });

    assert!(
        receiver.recv_timeout(Duration::from_secs(5)).is_ok(),
        "emission did not finish while a writer was waiting"
    );
    emitter.join().unwrap();
    writer.join().unwrap();
    assert!(!VM_DIAGNOSTICS.read().has_logger());
}
