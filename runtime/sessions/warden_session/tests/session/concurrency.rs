use std::collections::HashSet;
use std::thread;

use googletest::prelude::*;
use itertools::Itertools;
use warden::Response;
use warden_session::SessionStore;

use crate::helpers::{cookie_pair, request_with_cookie};

#[googletest::test]
fn concurrent_starts_register_one_session_each() {
    const N_THREADS: usize = 16;
    let store = SessionStore::default();

    let ids: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..N_THREADS)
            .map(|_| {
                let store = store.clone();
                scope.spawn(move || store.start(&mut Response::ok()).unwrap().id())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    expect_that!(store.len(), eq(N_THREADS));
    expect_that!(ids.iter().unique().count(), eq(N_THREADS));
}

#[googletest::test]
fn concurrent_readers_see_the_same_session() {
    let store = SessionStore::default();
    let mut response = Response::ok();
    let session = store.start(&mut response).unwrap();
    let cookie = cookie_pair(&response);

    let writers: HashSet<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = &store;
                let cookie = cookie.as_str();
                scope.spawn(move || {
                    let request = request_with_cookie(Some(cookie));
                    let session = store.get(&request).unwrap();
                    let key = format!("writer-{i}");
                    session.insert(key.clone(), vec![i as u8]);
                    key
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    expect_that!(session.len(), eq(writers.len()));
    for key in &writers {
        expect_true!(session.contains_key(key));
    }
}
