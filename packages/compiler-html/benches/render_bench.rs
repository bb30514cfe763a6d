use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mailwright_compiler_html::{compile_to_html, render_html, CompileOptions, TailwindInliner};
use mailwright_evaluator::Evaluator;
use mailwright_model::{ComponentTree, GlobalStyles};

const NEWSLETTER: &str = r##"[
  { "id": "p", "type": "Preview", "props": { "children": "This week in Mailwright" } },
  { "id": "h", "type": "Heading", "props": { "children": "Weekly update", "as": "h1" }, "className": "text-center" },
  { "id": "t", "type": "Text", "props": { "children": "Here is what shipped." }, "className": "text-gray-700 leading-relaxed" },
  { "id": "s", "type": "Stats", "props": { "stats": [
    { "value": "12k", "title": "Subscribers" },
    { "value": "48%", "title": "Open rate", "description": "Up 3 points" },
    { "value": "9", "title": "Releases" }
  ] } },
  { "id": "g", "type": "Gallery", "props": { "columns": 3, "images": [
    { "src": "https://example.com/1.png" }, { "src": "https://example.com/2.png" },
    { "src": "https://example.com/3.png" }, { "src": "https://example.com/4.png" },
    { "src": "https://example.com/5.png" }
  ] } },
  { "id": "b", "type": "Button", "props": { "children": "Read more", "href": "https://example.com" }, "className": "rounded-lg px-6 py-3" },
  { "id": "f", "type": "Footer", "props": {}, "children": [
    { "id": "si", "type": "SocialIcons", "props": { "platforms": ["x", "github", "linkedin"] } }
  ] }
]"##;

fn newsletter() -> ComponentTree {
    ComponentTree::from_json(NEWSLETTER).unwrap()
}

fn compile_newsletter(c: &mut Criterion) {
    let tree = newsletter();
    let globals = GlobalStyles::default();

    c.bench_function("compile_newsletter", |b| {
        b.iter(|| {
            let doc = Evaluator::new().evaluate(black_box(&tree), &globals);
            compile_to_html(&doc, CompileOptions::compact())
        })
    });
}

fn render_newsletter(c: &mut Criterion) {
    let tree = newsletter();
    let globals = GlobalStyles::default();
    let runtime = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("render_newsletter", |b| {
        b.iter(|| {
            runtime.block_on(render_html(
                black_box(&tree),
                &globals,
                &TailwindInliner,
                CompileOptions::compact(),
            ))
        })
    });
}

criterion_group!(benches, compile_newsletter, render_newsletter);
criterion_main!(benches);
