use pretty_assertions::assert_eq;

use userfs::{ErrorCode, OpenFlags, Store};

#[test]
fn roundtrip_across_a_block_boundary() {
    let mut store = Store::new();

    let writer = store.open(Some("f"), OpenFlags::CREATE);
    assert!(writer >= 0);

    let data: Vec<u8> = (0..513).map(|i| b'a' + (i % 26) as u8).collect();
    assert_eq!(store.write(writer, &data), data.len() as isize);

    let reader = store.open(Some("f"), OpenFlags::READ_WRITE);
    assert!(reader >= 0);

    let mut out = vec![0u8; data.len()];
    assert_eq!(store.read(reader, &mut out), data.len() as isize);
    assert_eq!(out, data);
    assert_eq!(store.read(reader, &mut [0u8; 1]), 0);

    assert_eq!(store.close(writer), 0);
    assert_eq!(store.close(reader), 0);
    assert_eq!(store.delete(Some("f")), 0);
}

#[test]
fn exact_block_boundaries_produce_the_expected_chain_lengths() {
    let mut store = Store::new();
    let fd = store.open(Some("boundary"), OpenFlags::CREATE);

    assert_eq!(store.write(fd, &[1u8; 512]), 512);
    assert_eq!(store.write(fd, &[2u8; 1]), 1);

    let mut out = vec![0u8; 513];
    let reader = store.open(Some("boundary"), OpenFlags::READ_WRITE);
    assert_eq!(store.read(reader, &mut out), 513);
    assert_eq!(&out[..512], &[1u8; 512][..]);
    assert_eq!(&out[512..], &[2u8]);
}

#[test]
fn many_files_round_trip_independently() {
    let mut store = Store::new();

    let names: Vec<String> = (0..200).map(|i| format!("file{i}")).collect();
    let mut writers = Vec::new();
    let mut readers = Vec::new();

    for name in &names {
        let w = store.open(Some(name), OpenFlags::CREATE);
        assert!(w >= 0, "open(CREATE) for {name} failed");
        let r = store.open(Some(name), OpenFlags::READ_WRITE);
        assert!(r >= 0, "second open for {name} failed");

        let mut payload = name.clone().into_bytes();
        payload.push(0);
        assert_eq!(store.write(w, &payload), payload.len() as isize);

        writers.push((w, payload));
        readers.push(r);
    }

    for ((w, payload), r) in writers.into_iter().zip(readers.into_iter()) {
        let mut out = vec![0u8; payload.len()];
        assert_eq!(store.read(r, &mut out), payload.len() as isize);
        assert_eq!(out, payload);

        assert_eq!(store.close(w), 0);
        assert_eq!(store.close(r), 0);
    }

    for name in &names {
        assert_eq!(store.delete(Some(name)), 0);
    }
}

#[test]
fn deleted_file_with_a_live_descriptor_is_tombstoned_until_close() {
    let mut store = Store::new();

    let first = store.open(Some("x"), OpenFlags::CREATE);
    assert_eq!(store.write(first, b"0123456789"), 10);

    assert_eq!(store.delete(Some("x")), 0);

    let second = store.open(Some("x"), OpenFlags::CREATE);
    assert!(second >= 0);
    assert_ne!(second, first);

    let mut fresh = [0u8; 1];
    assert_eq!(store.read(second, &mut fresh), 0, "fresh 'x' is a distinct, empty file");

    let mut out = [0u8; 10];
    assert_eq!(store.read(first, &mut out), 10);
    assert_eq!(&out, b"0123456789");

    assert_eq!(store.close(first), 0);
    assert_eq!(store.close(second), 0);
}

#[test]
fn resize_shrinks_and_grows_the_logical_length() {
    let mut store = Store::new();
    let fd = store.open(Some("r"), OpenFlags::CREATE);
    let payload = vec![7u8; 2000];
    assert_eq!(store.write(fd, &payload), 2000);

    assert_eq!(store.resize(fd, 100), 0);
    let mut out = vec![0u8; 256];
    let read = store.read(fd, &mut out);
    assert_eq!(read, 0, "fd's position already sits at the new end");

    let reader = store.open(Some("r"), OpenFlags::READ_WRITE);
    let mut out = vec![0u8; 256];
    assert_eq!(store.read(reader, &mut out), 100);
    assert_eq!(&out[..100], &payload[..100]);

    assert_eq!(store.resize(fd, 800), 0);
    let reader2 = store.open(Some("r"), OpenFlags::READ_WRITE);
    let mut out = vec![0u8; 800];
    assert_eq!(store.read(reader2, &mut out), 800);
    assert_eq!(&out[..100], &payload[..100]);

    assert_eq!(store.resize(fd, 0), 0);
    let reader3 = store.open(Some("r"), OpenFlags::READ_WRITE);
    let mut out = [0u8; 1];
    assert_eq!(store.read(reader3, &mut out), 0);
}

#[test]
fn descriptor_mode_is_enforced() {
    let mut store = Store::new();

    let fd = store.open(Some("m"), OpenFlags::CREATE | OpenFlags::READ_ONLY);
    assert_eq!(store.write(fd, b"nope"), -1);
    assert_eq!(store.errno(), ErrorCode::NoPermission);
    assert_eq!(store.close(fd), 0);

    let fd = store.open(Some("m"), OpenFlags::WRITE_ONLY);
    let mut buf = [0u8; 4];
    assert_eq!(store.read(fd, &mut buf), -1);
    assert_eq!(store.errno(), ErrorCode::NoPermission);
}

#[test]
fn writing_after_draining_a_descriptor_to_eof_does_not_panic() {
    let mut store = Store::new();

    let writer = store.open(Some("drain"), OpenFlags::CREATE);
    assert_eq!(store.write(writer, &[1u8; 512]), 512);

    let reader = store.open(Some("drain"), OpenFlags::READ_WRITE);
    let mut out = [0u8; 512];
    assert_eq!(store.read(reader, &mut out), 512, "drains the file to EOF");

    assert_eq!(store.write(reader, &[2u8; 3]), 3, "writing past EOF on the same descriptor must not panic");

    let verifier = store.open(Some("drain"), OpenFlags::READ_WRITE);
    let mut whole = [0u8; 515];
    assert_eq!(store.read(verifier, &mut whole), 515);
    assert_eq!(&whole[..512], &[1u8; 512][..]);
    assert_eq!(&whole[512..], &[2u8; 3]);
}

#[test]
fn resize_is_rejected_on_a_read_only_descriptor() {
    let mut store = Store::new();

    let fd = store.open(Some("ro"), OpenFlags::CREATE | OpenFlags::READ_ONLY);
    assert_eq!(store.resize(fd, 100), -1);
    assert_eq!(store.errno(), ErrorCode::NoPermission);
}

#[test]
fn descriptors_on_the_same_file_track_independent_positions() {
    let mut store = Store::new();

    let a = store.open(Some("d"), OpenFlags::CREATE);
    let b = store.open(Some("d"), OpenFlags::READ_WRITE);

    assert_eq!(store.write(a, b"hello"), 5);

    let mut out = [0u8; 5];
    assert_eq!(store.read(b, &mut out), 5);
    assert_eq!(&out, b"hello");

    assert_eq!(store.read(a, &mut [0u8; 1]), 0, "a's cursor already advanced past its own write");
}

#[test]
fn opening_a_missing_file_without_create_fails() {
    let mut store = Store::new();
    assert_eq!(store.open(Some("does-not-exist"), OpenFlags::READ_WRITE), -1);
    assert_eq!(store.errno(), ErrorCode::NoFile);
}

#[test]
fn closing_or_reading_an_invalid_descriptor_fails() {
    let mut store = Store::new();
    assert_eq!(store.close(0), -1);
    assert_eq!(store.errno(), ErrorCode::NoFile);

    let fd = store.open(Some("once"), OpenFlags::CREATE);
    assert_eq!(store.close(fd), 0);
    assert_eq!(store.close(fd), -1, "slot was freed, not left dangling");
    assert_eq!(store.errno(), ErrorCode::NoFile);
}

#[test]
fn empty_file_reads_as_eof() {
    let mut store = Store::new();
    let fd = store.open(Some("empty"), OpenFlags::CREATE);
    let mut buf = [0u8; 8];
    assert_eq!(store.read(fd, &mut buf), 0);
    assert_eq!(store.errno(), ErrorCode::NoError);
}
