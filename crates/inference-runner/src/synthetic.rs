// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Built-in deterministic backend.
//!
//! Serves model identities of the form `synthetic/<name>`. There are no
//! weights: the prompt is encoded as byte token ids (`0..256`), and each next
//! token is the argmax of a hash-derived logit over a small word vocabulary,
//! conditioned on the previous token and a seed taken from the model name.
//! Decoding is greedy, so the same model and prompt always produce the same
//! text. Different names give different continuations and lengths.
//!
//! ```text
//! id space:  0 ..= 255   prompt bytes
//!            256 ..      vocabulary words
//!            EOS_ID      end of sequence
//! ```

use crate::{Device, RunResult, Runner, RunnerError, RunnerFactory};
use std::time::Instant;

/// Identity prefix served by [`SyntheticFactory`].
pub const SYNTHETIC_PREFIX: &str = "synthetic/";

const VOCAB: [&str; 32] = [
    "the", "model", "token", "memory", "latency", "a", "of", "and", "to", "in", "is", "that",
    "edge", "device", "layer", "weights", "cache", "batch", "prompt", "output", "fast", "slow",
    "peak", "budget", "runtime", "kernel", "tensor", "attention", "head", "value", "query", "key",
];

const BYTE_VOCAB: u32 = 256;
const EOS_ID: u32 = BYTE_VOCAB + VOCAB.len() as u32;

/// A weightless, deterministic causal "model".
#[derive(Debug, Clone)]
pub struct SyntheticRunner {
    model_id: String,
    device: Device,
    seed: u64,
}

impl SyntheticRunner {
    /// Creates a runner whose behaviour is fixed by `model_id`.
    pub fn new(model_id: &str, device: Device) -> Self {
        Self {
            model_id: model_id.to_string(),
            device,
            seed: fnv1a(model_id.as_bytes()),
        }
    }

    /// Device the runner was placed on.
    pub fn device(&self) -> Device {
        self.device
    }

    fn encode(prompt: &str) -> Vec<u32> {
        prompt.bytes().map(u32::from).collect()
    }

    /// Greedy step: argmax over every word id and EOS.
    fn next_token(&self, context: u32) -> u32 {
        (BYTE_VOCAB..=EOS_ID)
            .max_by_key(|&candidate| self.logit(context, candidate))
            .unwrap_or(EOS_ID)
    }

    fn logit(&self, context: u32, candidate: u32) -> u64 {
        let h = mix(self.seed ^ (u64::from(context) << 32) ^ u64::from(candidate));
        // Quarter-scale EOS logit keeps most continuations going for a while.
        if candidate == EOS_ID {
            h >> 2
        } else {
            h
        }
    }

    fn decode(ids: &[u32]) -> String {
        let bytes: Vec<u8> = ids
            .iter()
            .filter(|&&id| id < BYTE_VOCAB)
            .map(|&id| id as u8)
            .collect();
        let words: Vec<&str> = ids
            .iter()
            .filter(|&&id| (BYTE_VOCAB..EOS_ID).contains(&id))
            .map(|&id| VOCAB[(id - BYTE_VOCAB) as usize])
            .collect();

        let prefix = String::from_utf8_lossy(&bytes);
        if words.is_empty() {
            prefix.into_owned()
        } else if prefix.is_empty() {
            words.join(" ")
        } else {
            format!("{prefix} {}", words.join(" "))
        }
    }
}

impl Runner for SyntheticRunner {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn run(&mut self, prompt: &str, max_new_tokens: usize) -> Result<RunResult, RunnerError> {
        let input = Self::encode(prompt);
        let start = Instant::now();

        let mut ids = input.clone();
        for _ in 0..max_new_tokens {
            let context = ids.last().copied().unwrap_or(EOS_ID);
            let next = self.next_token(context);
            ids.push(next);
            if next == EOS_ID {
                break;
            }
        }

        let latency = start.elapsed();
        let tokens_generated = ids.len() - input.len();
        let text = Self::decode(&ids);

        tracing::trace!(
            "{} generated {tokens_generated} tokens in {:.6}s",
            self.model_id,
            latency.as_secs_f64(),
        );

        Ok(RunResult {
            text,
            latency_seconds: latency.as_secs_f64(),
            tokens_generated,
        })
    }
}

/// Serves `synthetic/<name>` identities; rejects everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticFactory;

impl RunnerFactory for SyntheticFactory {
    fn create(&self, model_id: &str, device: Device) -> Result<Box<dyn Runner>, RunnerError> {
        match model_id.strip_prefix(SYNTHETIC_PREFIX) {
            Some(name) if !name.trim().is_empty() => {
                tracing::info!("loading synthetic model '{model_id}' on {device}");
                Ok(Box::new(SyntheticRunner::new(model_id, device)))
            }
            _ => Err(RunnerError::ModelNotFound {
                model: model_id.to_string(),
                detail: format!("the built-in backend only serves '{SYNTHETIC_PREFIX}<name>' models"),
            }),
        }
    }
}

/// 64-bit FNV-1a.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |h, &b| {
        (h ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// SplitMix64 finaliser.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
