use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"));
    let out_dir = crate_dir.join("include");

    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml")).unwrap_or_default();
    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => {
            if let Err(err) = std::fs::create_dir_all(&out_dir) {
                println!("cargo:warning=could not create {}: {err}", out_dir.display());
                return;
            }
            bindings.write_to_file(out_dir.join("cep.h"));
        }
        Err(err) => println!("cargo:warning=cbindgen failed, header not regenerated: {err}"),
    }
}
