//! The five deployment artifacts and the substitution context that fills
//! them in.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ScaffoldPlan ──► RenderContext ──► {{VAR}} substitution    │
//! │                                                             │
//! │  Dockerfile          base image + chroot home + xinetd      │
//! │  docker-compose.yaml one service, 23333 -> 9999             │
//! │  ctf.xinetd          chrooted, privilege-dropped service    │
//! │  start.sh            [patchelf] + xinetd + sleep infinity   │
//! │  build_image.sh      docker-compose up -d                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every renderer is a pure function of the plan. The only branch is
//! whether patchelf is in use, which appends extra sections to the
//! Dockerfile and start.sh.

use std::collections::HashMap;

use crate::domain::{
    entities::{Artifact, ScaffoldPlan},
    value_objects::{CHROOT_UID, EXTERNAL_PORT, INTERNAL_PORT, PER_SOURCE_LIMIT, RLIMIT_CPU_SECS},
};

pub const DOCKERFILE: &str = "Dockerfile";
pub const COMPOSE_FILE: &str = "docker-compose.yaml";
pub const XINETD_FILE: &str = "ctf.xinetd";
pub const START_SCRIPT: &str = "start.sh";
pub const BUILD_SCRIPT: &str = "build_image.sh";

/// Artifact file names in render order.
pub const ARTIFACT_FILES: [&str; 5] = [
    DOCKERFILE,
    COMPOSE_FILE,
    XINETD_FILE,
    START_SCRIPT,
    BUILD_SCRIPT,
];

const DOCKERFILE_HEAD: &str = r#"# dockerfile for {{TASK_NAME}}
FROM {{BASE_IMAGE}}

RUN sed -i "s/http:\/\/archive.ubuntu.com/http:\/\/mirrors.tuna.tsinghua.edu.cn/g" /etc/apt/sources.list && \
    apt-get update && apt-get -y dist-upgrade && \
    apt-get install -y lib32z1 xinetd

RUN useradd -m ctf

WORKDIR /home/ctf

RUN cp -R /lib* /home/ctf && \
    cp -R /usr/lib* /home/ctf

RUN mkdir /home/ctf/dev && \
    mknod /home/ctf/dev/null c 1 3 && \
    mknod /home/ctf/dev/zero c 1 5 && \
    mknod /home/ctf/dev/random c 1 8 && \
    mknod /home/ctf/dev/urandom c 1 9 && \
    chmod 666 /home/ctf/dev/*

RUN mkdir /home/ctf/bin && \
    cp /bin/sh /home/ctf/bin && \
    cp /bin/ls /home/ctf/bin && \
    cp /bin/cat /home/ctf/bin

COPY ./ctf.xinetd /etc/xinetd.d/ctf
COPY ./start.sh /start.sh
COPY ./task/ /home/ctf/

"#;

const DOCKERFILE_PATCHELF: &str = r#"# patchelf
COPY ./libs /libs
COPY ./patchelf /usr/bin/patchelf
COPY ./libs /home/ctf/libs
RUN chmod +x /usr/bin/patchelf

"#;

const DOCKERFILE_TAIL: &str = r#"# chmod
RUN echo "Blocked by ctf_xinetd" > /etc/banner_fail && \
    chmod +x /start.sh && \
    chown -R root:ctf /home/ctf && \
    chmod -R 750 /home/ctf && \
    chmod 740 /home/ctf/{{FLAG_NAME}}

CMD ["/start.sh"]

EXPOSE {{INTERNAL_PORT}}
"#;

const COMPOSE_TEMPLATE: &str = r#"# docker-compose.yaml for {{TASK_NAME}}
version: "3"
services:
  {{TASK_NAME}}:
    build: .
    restart: unless-stopped
    ports:
      - "{{EXTERNAL_PORT}}:{{INTERNAL_PORT}}"
"#;

const XINETD_TEMPLATE: &str = r#"service ctf
{
    disable     = no
    socket_type = stream
    protocol    = tcp
    wait        = no
    user        = root
    type        = UNLISTED
    port        = {{INTERNAL_PORT}}
    bind        = 0.0.0.0
    server      = /usr/sbin/chroot
    # replace pwn to your program
    server_args = --userspec={{CHROOT_UID}}:{{CHROOT_UID}} /home/ctf ./{{TASK_NAME}}
    banner_fail = /etc/banner_fail
    # safety options
    # the maximum instances of this service per source IP address
    per_source  = {{PER_SOURCE_LIMIT}}
    # the maximum number of CPU seconds that the service may use
    rlimit_cpu  = {{RLIMIT_CPU_SECS}}
    # rlimit_as  = 1024M
    # access_times = 2:00-9:00 12:00-24:00
}
"#;

const START_HEAD: &str = r#"#!/bin/sh
# add your own script here

"#;

const START_PATCHELF: &str = r#"# patchelf
patchelf --set-interpreter /libs/ld-{{LIBC_VERSION}}.so ./{{TASK_NAME}}
patchelf --replace-needed libc.so.6 /libs/libc-{{LIBC_VERSION}}.so ./{{TASK_NAME}}
"#;

const START_TAIL: &str = r#"# DO NOT DELETE
/etc/init.d/xinetd start;
sleep infinity;
"#;

const BUILD_TEMPLATE: &str = r#"#!/bin/sh
# build docker image for {{TASK_NAME}}
docker-compose up -d

# exec poc to validate
# python3 exp.py 127.0.0.1 {{EXTERNAL_PORT}} flag{test_flag}
"#;

/// Context for template rendering.
///
/// A **Value Object** holding every variable a template may reference.
///
/// | Variable | Example |
/// |----------|---------|
/// | `TASK_NAME` | "chal" |
/// | `FLAG_NAME` | "flag.txt" |
/// | `BASE_IMAGE` | "ubuntu:20.04" |
/// | `LIBC_VERSION` | "2.27" (patchelf only) |
/// | `INTERNAL_PORT`, `EXTERNAL_PORT` | "9999", "23333" |
/// | `CHROOT_UID`, `PER_SOURCE_LIMIT`, `RLIMIT_CPU_SECS` | "1000", "10", "20" |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<&'static str, String>,
}

impl RenderContext {
    pub fn for_plan(plan: &ScaffoldPlan) -> Self {
        let mut vars = HashMap::new();
        vars.insert("TASK_NAME", plan.task_name().to_owned());
        vars.insert("FLAG_NAME", plan.flag_name().to_owned());
        vars.insert("BASE_IMAGE", plan.platform().image());
        vars.insert("INTERNAL_PORT", INTERNAL_PORT.to_string());
        vars.insert("EXTERNAL_PORT", EXTERNAL_PORT.to_string());
        vars.insert("CHROOT_UID", CHROOT_UID.to_string());
        vars.insert("PER_SOURCE_LIMIT", PER_SOURCE_LIMIT.to_string());
        vars.insert("RLIMIT_CPU_SECS", RLIMIT_CPU_SECS.to_string());
        if let Some(patch) = plan.patch() {
            vars.insert("LIBC_VERSION", patch.libc_version.to_string());
        }
        Self { variables: vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{VARIABLE}}` placeholder in a single left-to-right
    /// scan. Substituted values are never re-scanned, so a file name
    /// containing braces cannot expand into another variable.
    ///
    /// Unknown placeholders are kept verbatim.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => match self.get(&after[..end]) {
                    Some(value) => {
                        out.push_str(value);
                        rest = &after[end + 2..];
                    }
                    None => {
                        out.push_str("{{");
                        rest = after;
                    }
                },
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Render all five artifacts in [`ARTIFACT_FILES`] order.
pub fn render_all(plan: &ScaffoldPlan) -> Vec<Artifact> {
    let ctx = RenderContext::for_plan(plan);
    vec![
        dockerfile(plan, &ctx),
        compose_file(&ctx),
        xinetd_config(&ctx),
        start_script(plan, &ctx),
        build_script(&ctx),
    ]
}

pub fn dockerfile(plan: &ScaffoldPlan, ctx: &RenderContext) -> Artifact {
    let mut content = ctx.render(DOCKERFILE_HEAD);
    if plan.uses_patchelf() {
        content.push_str(DOCKERFILE_PATCHELF);
    }
    content.push_str(&ctx.render(DOCKERFILE_TAIL));
    Artifact::new(DOCKERFILE, content)
}

pub fn compose_file(ctx: &RenderContext) -> Artifact {
    Artifact::new(COMPOSE_FILE, ctx.render(COMPOSE_TEMPLATE))
}

pub fn xinetd_config(ctx: &RenderContext) -> Artifact {
    Artifact::new(XINETD_FILE, ctx.render(XINETD_TEMPLATE))
}

pub fn start_script(plan: &ScaffoldPlan, ctx: &RenderContext) -> Artifact {
    let mut content = START_HEAD.to_owned();
    if plan.uses_patchelf() {
        content.push_str(&ctx.render(START_PATCHELF));
    }
    content.push_str(START_TAIL);
    Artifact::new(START_SCRIPT, content).executable()
}

pub fn build_script(ctx: &RenderContext) -> Artifact {
    Artifact::new(BUILD_SCRIPT, ctx.render(BUILD_TEMPLATE)).executable()
}
