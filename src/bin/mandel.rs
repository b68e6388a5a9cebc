// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandel;
extern crate num_cpus;

use clap::{App, AppSettings, Arg, ArgMatches};
use mandel::{RenderConfig, Renderer};
use std::str::FromStr;

const ITERATIONS: &str = "iterations";
const VIEWPORT: &str = "viewport";
const SIZE: &str = "size";
const NAME: &str = "name";
const THREADS: &str = "threads";

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot renderer")
        .setting(AppSettings::AllowLeadingHyphen)
        .arg(
            Arg::with_name(ITERATIONS)
                .index(1)
                .help("Iteration cap, or the path of a configuration file"),
        )
        .arg(
            Arg::with_name(VIEWPORT)
                .index(2)
                .help("CENTERX,CENTERY,WIDTH,HEIGHT of the region of the complex plane"),
        )
        .arg(
            Arg::with_name(SIZE)
                .index(3)
                .help("WIDTHxHEIGHT of the output image"),
        )
        .arg(
            Arg::with_name(NAME)
                .index(4)
                .multiple(true)
                .help("Output name, joined with underscores; .ppm is appended"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver [default: one per CPU]"),
        )
        .get_matches()
}

fn usage() {
    println!("Usage: mandel [ITERATIONS|CONFIG] [CENTERX,CENTERY,WIDTH,HEIGHT] [WIDTHxHEIGHT] [NAME...]");
    println!("Example: mandel 600 -1.1428,-0.2119,0.0055,0.0042 1000x1000 seahorse valley");
}

fn fail(err: &mandel::Error) -> ! {
    println!("{}", err);
    std::process::exit(1);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = args();
    let positional: Vec<&str> = [ITERATIONS, VIEWPORT, SIZE]
        .iter()
        .filter_map(|name| matches.value_of(name))
        .chain(matches.values_of(NAME).into_iter().flatten())
        .collect();
    let threads = matches
        .value_of(THREADS)
        .and_then(|s| usize::from_str(s).ok())
        .unwrap_or_else(num_cpus::get);

    let config = match RenderConfig::from_args(&positional) {
        Ok(config) => config,
        Err(err) => {
            println!("{}", err);
            usage();
            std::process::exit(1);
        }
    };
    debug!("{:?}", config);

    let renderer = Renderer::new(config);
    let records = renderer.render(threads).unwrap_or_else(|err| fail(&err));
    renderer.save(&records).unwrap_or_else(|err| fail(&err));
}
