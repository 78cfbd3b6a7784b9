//! Pinned versions, URLs, and digests for optional third-party components.
//!
//! Everything the installer fetches is pinned. Only the NetRexx artifact
//! carries a digest; SourceForge mirrors have served truncated copies of
//! it in the past, so it gets one verification with a single re-download.

/// Pinned OpenJDK archive (Linux x64, GPL build).
pub const JDK_URL: &str =
    "https://download.java.net/java/GA/jdk11/9/GPL/openjdk-11.0.2_linux-x64_bin.tar.gz";

/// `JAVA_HOME` directory name inside the extracted JDK archive.
pub const JDK_DIR: &str = "jdk-11.0.2";

/// Pinned Apache Ant binary distribution.
pub const ANT_URL: &str =
    "https://archive.apache.org/dist/ant/binaries/apache-ant-1.10.12-bin.tar.gz";

/// Pinned NetRexx compiler jar, required by Ant's optional tasks.
pub const NETREXX_URL: &str =
    "https://downloads.sourceforge.net/project/netrexx/netrexx/NetRexx-3.04GA/NetRexxC.jar";

/// Hard-coded SHA-256 digest for the NetRexx jar.
pub const NETREXX_SHA256: &str =
    "8e2606c9b8e0d07e291bd3facbfc7b1e914861e6f07cb8ff4672274bbc5b788c";

/// Pinned CLAW compiler repository and tag. Cloned recursively because the
/// OMNI compiler ships as a submodule.
pub const CLAW_REPO: &str = "https://github.com/claw-project/claw-compiler.git";
pub const CLAW_TAG: &str = "v2.0.2";

/// Version string written into the Open Fortran Parser package after the
/// editable install, so OFP's own dependency fetch resolves the jars the
/// Loki frontend was validated against.
pub const OFP_VERSION: &str = "0.8.4-1";

/// Python package name of the patched parser.
pub const OFP_PACKAGE: &str = "open_fortran_parser";

/// Fixed-version toolchain modules loaded in ECMWF workstation mode.
pub const ECMWF_MODULES: &[&str] = &["cmake/3.19.5", "java/11.0.6", "python3/3.8.8-01"];

/// Extra modules loaded when the Maxeler simulator toolchain is requested.
pub const MAXELER_MODULES: &[&str] = &["maxeler/maxcompiler/2021.1"];

/// Proxy configuration applied in ECMWF workstation mode.
pub const ECMWF_PROXY_VAR: &str = "https_proxy";
pub const ECMWF_PROXY: &str = "http://proxy.ecmwf.int:3333";

/// Default virtual environment directory, relative to the project root.
pub const DEFAULT_VENV_DIR: &str = "loki_env";

/// Name of the generated activation script at the project root.
pub const ACTIVATE_SCRIPT: &str = "loki-activate";
