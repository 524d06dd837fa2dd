// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Host/client roles, hydration from disk, teardown.

mod common;

use common::Fixture;
use msettings::record::{NO_CHANGE, RECORD_SIZE};
use msettings::{Role, SettingsError, SettingsRecord, SettingsStore, ShmHandle, ShmOpenMode};

#[test]
fn first_open_is_host_with_defaults() {
    let fx = Fixture::new("host_defaults");
    let (store, role) = SettingsStore::open(&fx.config).unwrap();
    assert_eq!(role, Role::Host);
    assert_eq!(store.snapshot(), SettingsRecord::default());
    store.close(role);
}

#[test]
fn host_hydrates_from_persisted_file() {
    let fx = Fixture::new("host_hydrate");
    let saved = SettingsRecord {
        brightness: 7,
        color_temperature: 31,
        speaker_volume: 12,
        headphone_volume: 3,
        contrast: -2,
        saturation: 4,
        exposure: 1,
        muted_contrast: 2,
        ..SettingsRecord::default()
    };
    fx.write_persisted(&saved);

    let (store, role) = SettingsStore::open(&fx.config).unwrap();
    assert_eq!(role, Role::Host);
    assert_eq!(store.snapshot(), saved);
    store.close(role);
}

#[test]
fn wrong_sized_file_falls_back_to_defaults() {
    let fx = Fixture::new("host_bad_size");
    let mut bytes = SettingsRecord {
        brightness: 9,
        ..SettingsRecord::default()
    }
    .as_bytes()
    .to_vec();
    bytes.truncate(RECORD_SIZE - 8);
    std::fs::write(fx.path(), &bytes).unwrap();

    let (store, role) = SettingsStore::open(&fx.config).unwrap();
    assert_eq!(store.snapshot(), SettingsRecord::default());
    store.close(role);
}

#[test]
fn second_open_is_client_sharing_the_record() {
    let fx = Fixture::new("client_shares");
    let (host, host_role) = SettingsStore::open(&fx.config).unwrap();

    // A file written after the host started must not be loaded by the client.
    fx.write_persisted(&SettingsRecord {
        brightness: 10,
        ..SettingsRecord::default()
    });
    let (client, client_role) = SettingsStore::open(&fx.config).unwrap();
    assert_eq!(host_role, Role::Host);
    assert_eq!(client_role, Role::Client);
    assert_eq!(client.snapshot(), host.snapshot());
    assert_eq!(client.snapshot().muted_brightness, NO_CHANGE);

    client.close(client_role);
    host.close(host_role);
}

#[test]
fn closing_client_keeps_region_closing_host_removes_it() {
    let fx = Fixture::new("teardown");
    let (host, host_role) = SettingsStore::open(&fx.config).unwrap();
    let (client, client_role) = SettingsStore::open(&fx.config).unwrap();

    client.close(client_role);
    let (again, again_role) = SettingsStore::open(&fx.config).unwrap();
    assert_eq!(again_role, Role::Client);
    again.close(again_role);

    host.close(host_role);
    assert!(ShmHandle::acquire(&fx.config.shm_name, RECORD_SIZE, ShmOpenMode::Open).is_err());

    let (next, next_role) = SettingsStore::open(&fx.config).unwrap();
    assert_eq!(next_role, Role::Host);
    next.close(next_role);
}

#[test]
fn persist_writes_exact_record_bytes() {
    let fx = Fixture::new("persist_bytes");
    let (store, role) = SettingsStore::open(&fx.config).unwrap();
    store.persist().unwrap();

    let bytes = std::fs::read(fx.path()).unwrap();
    assert_eq!(bytes.len(), RECORD_SIZE);
    assert_eq!(bytes, store.snapshot().as_bytes());
    store.close(role);
}

#[test]
fn persist_overwrites_longer_file() {
    let fx = Fixture::new("persist_truncates");
    let (store, role) = SettingsStore::open(&fx.config).unwrap();
    std::fs::write(fx.path(), vec![0xAB; RECORD_SIZE * 2]).unwrap();

    store.persist().unwrap();
    assert_eq!(std::fs::metadata(fx.path()).unwrap().len(), RECORD_SIZE as u64);
    store.close(role);
}

#[test]
fn persist_failure_is_reported() {
    let fx = Fixture::new("persist_fails");
    let config = fx
        .config
        .clone()
        .with_shm_name(common::unique_name("persist_fails_shm"));
    let config = msettings::SettingsConfig {
        persistence_path: fx.dir.path().join("missing").join("msettings.bin"),
        ..config
    };
    let (store, role) = SettingsStore::open(&config).unwrap();
    let err = store.persist().unwrap_err();
    assert!(matches!(err, SettingsError::Persist { .. }));
    store.close(role);
}

#[test]
fn invalid_shm_name_is_startup_failure() {
    let fx = Fixture::new("bad_name");
    let config = fx.config.clone().with_shm_name("/not/allowed");
    let err = SettingsStore::open(&config).err().expect("must fail");
    assert!(matches!(err, SettingsError::Startup { .. }));
}
