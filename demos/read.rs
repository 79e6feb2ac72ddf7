use ods::tag::NamedTag;
use ods::{Container, Registries};
use std::env::temp_dir;

fn main() {
    env_logger::init();

    let registries = Registries::new();
    let path = temp_dir().join("ods-demo.ods");
    let mut container = Container::file(&path, "identity", &registries);
    container
        .save(&[
            NamedTag::string("name", "Bananrama"),
            NamedTag::int("count", 3),
        ])
        .unwrap();

    let name = container.get("name").unwrap().unwrap();
    println!("name: {}", name.value.as_str().unwrap());
    println!("{:#?}", container.get_all().unwrap());
}
