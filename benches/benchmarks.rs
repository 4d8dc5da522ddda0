use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nimbus::configuration::Configuration;
use nimbus::recent_store::RecentStore;
use nimbus::records::ValueRecord;
use nimbus::render_context::RenderContext;
use nimbus::snow_diary::SnowDiary;
use nimbus::station_state::StationData;
use nimbus::tag_invocation::{TagInvocation, tokenize};
use nimbus::tag_registry::TagRegistry;
use nimbus::template_renderer::TemplateRenderer;

// ---------------------------------------------------------------------------
// tokenize – character scan of raw invocations
// ---------------------------------------------------------------------------
fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    group.bench_function("name_only", |b| {
        b.iter(|| tokenize(black_box("temp")));
    });
    group.bench_function("simple_pair", |b| {
        b.iter(|| tokenize(black_box("byMonthTempH mon=5 rc=y")));
    });
    group.bench_function("quoted_value", |b| {
        b.iter(|| tokenize(black_box(r#"todayTempHTime format="%H:%M on %d %B" tc=y"#)));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// TagInvocation::new_from_text – tokenize plus key/value pairing
// ---------------------------------------------------------------------------
fn bench_invocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("TagInvocation::new_from_text");

    group.bench_function("simple", |b| {
        b.iter(|| TagInvocation::new_from_text(black_box("temp rc=y")));
    });
    group.bench_function("many_params", |b| {
        b.iter(|| {
            TagInvocation::new_from_text(black_box(
                r#"RecentTemp d=1 h=2 m=30 dp=2 rc=y format="%H:%M""#,
            ))
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Registry build and full template rendering
// ---------------------------------------------------------------------------
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    group.bench_function("registry_build", |b| {
        b.iter(TagRegistry::new);
    });

    let config = Configuration::default();
    let mut station = StationData::default();
    station.current.temperature = 18.4;
    station.current.humidity = 72.0;
    station.current.pressure = 1013.2;
    let set_at = NaiveDate::from_ymd_opt(2026, 8, 1)
        .unwrap()
        .and_hms_opt(10, 15, 0)
        .unwrap();
    station.today.high_temp = ValueRecord::new(24.6, set_at);
    station.all_time.high_temp = ValueRecord::new(38.7, set_at);
    let recent = RecentStore::new();
    let diary = SnowDiary::new();
    let ctx = RenderContext {
        config: &config,
        station: &station,
        recent: &recent,
        diary: &diary,
        now: set_at,
    };
    let renderer = TemplateRenderer::new(TagRegistry::new());

    let realtime = "<#date> <#timehhmmss> <#temp rc=y> <#hum> <#press rc=y> \
                    <#wspeed rc=y> <#bearing> <#wdir> <#rfall rc=y> <#rrate rc=y>";
    group.bench_function("realtime_template", |b| {
        b.iter(|| renderer.render_text(black_box(realtime), &ctx));
    });

    let page = r#"<html><body>
<h1><#location></h1>
<p>Updated <#update></p>
<p>Temperature: <#temp> <#tempunit>, high today <#todayTempH> at <#todayTempHTime></p>
<p>All-time high: <#recordTempH> at <#recordTempHTime format="%H:%M on %d %B %Y"></p>
<p>Humidity <#hum>%, pressure <#press> <#pressunit>, rain <#rfall> <#rainunit></p>
<p>May record: <#byMonthTempH mon=5></p>
</body></html>"#;
    group.bench_function("web_page_template", |b| {
        b.iter(|| renderer.render_text(black_box(page), &ctx));
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_invocation, bench_render);
criterion_main!(benches);
