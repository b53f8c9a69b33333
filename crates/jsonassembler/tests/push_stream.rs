#![allow(missing_docs)]

//! A producer task pushes chunks into a channel while the assembler awaits
//! them on the receiving end.

use std::{
    cell::RefCell,
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use futures::channel::mpsc;
use jsonassembler::{Assembler, AssemblerOptions, BoxChunkStream, Value};

const CHUNKS: [&str; 5] = [
    r#"{"moder"#,
    r#"ation":"al"#,
    r#"low","code":"#,
    r#""fn main() {}"#,
    r#""}"#,
];

fn expected() -> Value {
    let mut map = jsonassembler::Map::new();
    map.insert("moderation".into(), Value::String("allow".into()));
    map.insert("code".into(), Value::String("fn main() {}".into()));
    Value::Object(map)
}

#[tokio::test]
async fn updates_arrive_before_the_producer_finishes() {
    let (tx, rx) = mpsc::unbounded::<String>();
    let sent = Arc::new(AtomicUsize::new(0));

    let producer = tokio::spawn({
        let sent = Arc::clone(&sent);
        async move {
            for chunk in CHUNKS {
                sent.fetch_add(1, Ordering::SeqCst);
                tx.unbounded_send(chunk.to_string()).unwrap();
                tokio::task::yield_now().await;
            }
        }
    });

    let first_update_at = Rc::new(RefCell::new(None));
    let seen = Rc::clone(&first_update_at);
    let observed = Arc::clone(&sent);
    let mut assembler = Assembler::from_stream(rx).on_update(move |_| {
        let mut slot = seen.borrow_mut();
        if slot.is_none() {
            *slot = Some(observed.load(Ordering::SeqCst));
        }
    });

    let value = assembler.assemble().await;
    producer.await.unwrap();

    assert_eq!(value, expected());
    let first = first_update_at.borrow().unwrap();
    assert!(first < CHUNKS.len(), "first update only after {first} chunks");
}

#[tokio::test]
async fn stream_waits_on_slow_producer() {
    let (tx, rx) = mpsc::unbounded::<String>();
    let producer = tokio::spawn(async move {
        for chunk in CHUNKS {
            tokio::time::sleep(Duration::from_millis(5)).await;
            tx.unbounded_send(chunk.to_string()).unwrap();
        }
    });

    let result = Assembler::from_stream(rx).assemble_detailed().await;
    producer.await.unwrap();

    assert_eq!(result.value, expected());
    assert!(!result.truncated);
}

#[tokio::test]
async fn closed_channel_truncates() {
    let (tx, rx) = mpsc::unbounded::<String>();
    tx.unbounded_send(r#"{"moderation":"blo"#.to_string()).unwrap();
    drop(tx);

    let result = Assembler::from_stream(rx).assemble_detailed().await;
    assert!(result.truncated);
    assert_eq!(result.value.to_string(), r#"{"moderation":"blo"}"#);
}

#[tokio::test]
async fn boxed_stream_from_options() {
    let (tx, rx) = mpsc::unbounded::<String>();
    for chunk in CHUNKS {
        tx.unbounded_send(chunk.to_string()).unwrap();
    }
    drop(tx);

    let stream: BoxChunkStream = Box::pin(rx);
    let mut assembler = Assembler::new(AssemblerOptions {
        stream: Some(stream),
        ..AssemblerOptions::default()
    })
    .unwrap();
    assert_eq!(assembler.assemble().await, expected());
}

#[test]
fn blocking_assembly_fed_from_a_thread() {
    let (tx, rx) = mpsc::unbounded::<String>();
    let producer = thread::spawn(move || {
        for chunk in CHUNKS {
            thread::sleep(Duration::from_millis(2));
            tx.unbounded_send(chunk.to_string()).unwrap();
        }
    });

    let value = Assembler::from_stream(rx).assemble_blocking();
    producer.join().unwrap();
    assert_eq!(value, expected());
}
