//! ALSA plugin registration snippet (49-pipewire-modules.conf)
//!
//! Points ALSA's `pipewire` PCM and control plugin types at the PipeWire
//! plugin libraries, optionally with their 32-bit builds.

/// Location of the snippet below the output root.
pub const ALSA_MODULES_PATH: &str = "alsa/conf.d/49-pipewire-modules.conf";

const PLUGIN_TYPES: [(&str, &str); 2] = [
    ("pcm_type.pipewire", "libasound_module_pcm_pipewire.so"),
    ("ctl_type.pipewire", "libasound_module_ctl_pipewire.so"),
];

/// Render the plugin snippet.
///
/// `native_lib` and `lib32` are library roots; the plugins live in their
/// `alsa-lib` subdirectory. `lib32` is only given when the 32-bit plugins
/// are wanted.
pub fn render_alsa_modules(native_lib: &str, lib32: Option<&str>) -> String {
    let mut out = String::new();
    for (plugin_type, library) in PLUGIN_TYPES {
        out.push_str(&format!("{} {{\n", plugin_type));
        out.push_str(&format!("  libs.native = {} ;\n", plugin_path(native_lib, library)));
        if let Some(lib32) = lib32 {
            out.push_str(&format!("  libs.32Bit = {} ;\n", plugin_path(lib32, library)));
        }
        out.push_str("}\n");
    }
    out
}

fn plugin_path(lib_root: &str, library: &str) -> String {
    format!("{}/alsa-lib/{}", lib_root.trim_end_matches('/'), library)
}
