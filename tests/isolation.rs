// SPDX-License-Identifier: MIT OR Apache-2.0

//! Independent contexts never observe each other's loggers or levels.

use logspace::{Level, LogContext};
use std::thread;

#[test]
fn same_name_different_contexts() {
    let contexts: Vec<LogContext> = (0..4).map(|_| LogContext::create().unwrap()).collect();
    let loggers: Vec<_> = contexts.iter().map(|c| c.logger("app.db")).collect();
    for (i, a) in loggers.iter().enumerate() {
        for b in &loggers[i + 1..] {
            assert_ne!(a, b);
            assert_eq!(a.name(), b.name());
        }
    }

    loggers[0].set_level(Some(Level::Trace)).unwrap();
    for logger in &loggers[1..] {
        assert!(!logger.is_loggable(Level::Trace));
    }
    assert_eq!(contexts[1].mx_bean().logger_names(), vec!["app.db".to_string()]);
}

#[test]
fn readers_and_writers_on_one_context() {
    let context = LogContext::create().unwrap();
    let parent = context.logger("svc");

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let context = context.clone();
            thread::spawn(move || {
                for j in 0..50 {
                    context.logger(&format!("svc.worker{i}.task{j}"));
                }
            })
        })
        .collect();
    let toggler = {
        let parent = parent.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                parent.set_level(Some(Level::Debug)).unwrap();
                parent.set_level(Some(Level::Warn)).unwrap();
            }
        })
    };
    for writer in writers {
        writer.join().expect("writer should complete");
    }
    toggler.join().expect("toggler should complete");

    // every descendant agrees with the final level of its ancestor
    for name in context.mx_bean().logger_names() {
        if name.starts_with("svc.") {
            let logger = context.logger_if_exists(&name).expect("listed logger exists");
            assert_eq!(logger.effective_level(), Level::Warn, "{name}");
        }
    }
    assert_eq!(context.mx_bean().logger_names().len(), 1 + 4 * 50);
}

#[test]
fn dropped_context_leaves_loggers_usable() {
    let logger = {
        let context = LogContext::create().unwrap();
        context.logger("orphan.child")
    };
    assert_eq!(logger.name(), "orphan.child");
    assert_eq!(logger.effective_level(), Level::Info);
    // ancestors were owned by the context's tree
    assert!(logger.parent().is_none());
}
