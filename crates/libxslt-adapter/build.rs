fn main() {
    let shim_path = std::path::Path::new("csrc").join("error_shim.c");

    let mut c_config = cc::Build::new();
    c_config.std("c11").warnings(true);
    c_config.file(&shim_path);
    println!("cargo:rerun-if-changed={}", shim_path.display());

    c_config.compile("libxslt-adapter-shim");
}
