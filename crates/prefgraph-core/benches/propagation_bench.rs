use criterion::{criterion_group, criterion_main, Bencher, BenchmarkId, Criterion, Throughput};
use prefgraph_core::{
    hydrate, project, Category, Channel, EntityRef, Event, OptionIndex, Propagator, Subscription,
};
use std::hint::black_box;

fn gen_hierarchy(
    categories: usize,
    events: usize,
    channels: usize,
) -> (Vec<Category>, Vec<Channel>) {
    let categories = (0..categories)
        .map(|c| {
            Category::new(
                format!("category_{}", c),
                format!("Category {}", c),
                (0..events)
                    .map(|e| Event::new(format!("event_{}_{}", c, e), format!("Event {}", e)))
                    .collect(),
            )
        })
        .collect();
    let channels = (0..channels)
        .map(|x| Channel::new(format!("channel_{}", x), format!("Channel {}", x)))
        .collect();
    (categories, channels)
}

fn gen_subscriptions(categories: &[Category], channels: &[Channel]) -> Vec<Subscription> {
    categories
        .iter()
        .flat_map(|c| c.events.iter().step_by(2))
        .flat_map(|e| {
            channels.iter().map(move |ch| {
                Subscription::new(
                    format!("{}-{}", e.id, ch.id),
                    EntityRef::new(e.id.clone(), e.name.clone()),
                    ch.to_ref(),
                )
            })
        })
        .collect()
}

fn bench_hydrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("hydrate");
    for &n in &[10usize, 50] {
        let (categories, channels) = gen_hierarchy(n, 10, 4);
        let subs = gen_subscriptions(&categories, &channels);
        let index = OptionIndex::build(&categories, &channels, &subs).unwrap();

        group.throughput(Throughput::Elements(index.event_options().len() as u64));
        group.bench_with_input(BenchmarkId::new("hydrate", n), &n, |b: &mut Bencher, _| {
            b.iter(|| black_box(hydrate(black_box(&index)).unwrap()))
        });
        let store = hydrate(&index).unwrap();
        group.bench_with_input(BenchmarkId::new("project", n), &n, |b: &mut Bencher, _| {
            b.iter(|| black_box(project(&index, &store)))
        });
    }
    group.finish();
}

fn bench_clicks(c: &mut Criterion) {
    let mut group = c.benchmark_group("clicks");
    for &n in &[10usize, 50] {
        let (categories, channels) = gen_hierarchy(n, 10, 4);
        let index = OptionIndex::build(&categories, &channels, &[]).unwrap();
        let propagator = Propagator::new(&index);
        let option = index.event_options()[index.event_options().len() / 2].clone();

        group.bench_with_input(BenchmarkId::new("bubble_up", n), &n, |b: &mut Bencher, _| {
            let mut store = hydrate(&index).unwrap();
            b.iter(|| black_box(propagator.bubble_up(&mut store, &option).unwrap()))
        });
        group.bench_with_input(
            BenchmarkId::new("bubble_down_channel", n),
            &n,
            |b: &mut Bencher, _| {
                let mut store = hydrate(&index).unwrap();
                b.iter(|| {
                    black_box(
                        propagator
                            .bubble_down_channel(&mut store, "channel_0")
                            .unwrap(),
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_hydrate, bench_clicks);
criterion_main!(benches);
