//! # tmp2p Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Address parsing | `PeerAddress::parse` on typical tokens |
//! | Identity | `NodeId::from_public_key` |
//! | Handshake | full secret connection over an in-memory duplex |
//! | Framing | 64 KiB through an established connection |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_crypto::Ed25519KeyPair;
use std::time::Duration;
use tmp2p_validation::{NodeId, PeerAddress, SecretConnection};
use tokio::io::duplex;
use tokio::runtime::Runtime;

// ============================================================================
// Address parsing
// ============================================================================

fn bench_address_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("address-parsing");
    let id = NodeId::from_public_key(&Ed25519KeyPair::generate().public_key());

    let tokens = [
        ("host_port", "seed.example.net:26656".to_string()),
        ("with_id", format!("{id}@1.2.3.4:26656")),
        ("tcp_ipv6", format!("tcp://{id}@[2001:db8::1]:26656")),
    ];

    for (name, token) in &tokens {
        group.bench_with_input(BenchmarkId::new("parse", name), token, |b, token| {
            b.iter(|| black_box(PeerAddress::parse(black_box(token)).is_ok()))
        });
    }
    group.finish();
}

// ============================================================================
// Identity
// ============================================================================

fn bench_node_id(c: &mut Criterion) {
    let key = Ed25519KeyPair::generate().public_key();
    c.bench_function("node_id_from_public_key", |b| {
        b.iter(|| black_box(NodeId::from_public_key(black_box(&key))))
    });
}

// ============================================================================
// Handshake and framing
// ============================================================================

fn bench_handshake(c: &mut Criterion) {
    let Ok(rt) = Runtime::new() else {
        return;
    };
    let a_key = Ed25519KeyPair::generate();
    let b_key = Ed25519KeyPair::generate();

    let mut group = c.benchmark_group("secret-connection");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("handshake_both_sides", |b| {
        b.iter(|| {
            rt.block_on(async {
                let (a_io, b_io) = duplex(64 * 1024);
                let (a, b) = tokio::join!(
                    SecretConnection::handshake(a_io, &a_key),
                    SecretConnection::handshake(b_io, &b_key),
                );
                black_box((a.is_ok(), b.is_ok()))
            })
        })
    });

    let payload = vec![0xA5u8; 64 * 1024];
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("transfer_64k", |b| {
        b.iter(|| {
            rt.block_on(async {
                let (a_io, b_io) = duplex(256 * 1024);
                let (a, b) = tokio::join!(
                    SecretConnection::handshake(a_io, &a_key),
                    SecretConnection::handshake(b_io, &b_key),
                );
                let (Ok(mut a), Ok(mut b)) = (a, b) else {
                    return;
                };
                let mut received = vec![0u8; payload.len()];
                let (sent, read) = tokio::join!(a.write_all(&payload), b.read_exact(&mut received));
                black_box((sent.is_ok(), read.is_ok()));
            })
        })
    });
    group.finish();
}

criterion_group!(benches, bench_address_parsing, bench_node_id, bench_handshake);
criterion_main!(benches);
