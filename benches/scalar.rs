use criterion::{criterion_group, criterion_main, Criterion};
use odid_deku::message::{self, BasicId, IdType, Message, UaType};
use odid_deku::scalar;

fn speed_horizontal_sweep() {
    for raw in 0u8..=255 {
        let _ = scalar::decode_speed_horizontal(raw, false);
        let _ = scalar::decode_speed_horizontal(raw, true);
    }
}

fn round_trip_basic_id() {
    let mut uas_id = [0u8; 20];
    uas_id[..5].copy_from_slice(b"N1234");
    let msg = Message::BasicId(BasicId { id_type: IdType::Serial, ua_type: UaType::Rotorcraft, uas_id });
    let mut buf = [0u8; 25];
    msg.encode(&mut buf).unwrap();
    let _ = message::decode(&buf).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("decode_speed_horizontal_sweep", |b| b.iter(speed_horizontal_sweep));
    c.bench_function("basic_id_round_trip", |b| b.iter(round_trip_basic_id));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
