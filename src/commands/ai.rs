//! The `ai` command set: canned ML tooling plus a small training project
//! seeded into the learner's home directory.

use crate::command::{Command, CommandRegistry, CommandResult, HandlerResult};
use crate::commands::canned::CannedCommand;
use crate::context::TerminalContext;
use crate::error::FsError;
use crate::vfs::{join, VirtualFileSystem};

const TENSORBOARD_USAGE: &str = "usage: tensorboard --logdir=<directory>";
const PIP_USAGE: &str = "usage: pip {list|install|show} [package]";

const NVIDIA_SMI: &str = "+-----------------------------------------------------------------------------+
| NVIDIA-SMI 470.57.02    Driver Version: 470.57.02    CUDA Version: 11.4     |
|-------------------------------+----------------------+----------------------+
| GPU  Name        Persistence-M| Bus-Id        Disp.A | Volatile Uncorr. ECC |
| Fan  Temp  Perf  Pwr:Usage/Cap|         Memory-Usage | GPU-Util  Compute M. |
|                               |                      |               MIG M. |
|===============================+======================+======================|
|   0  Tesla V100-SXM2...  Off  | 00000000:00:04.0 Off |                    0 |
| N/A   32C    P0    41W / 300W |   1024MiB / 16160MiB |      2%      Default |
|                               |                      |                  N/A |
+-------------------------------+----------------------+----------------------+";

const HTOP: &str = "htop - 10:30:45 up 1 day,  3:45,  1 user,  load average: 0.15, 0.20, 0.25
Tasks: 125 total,   1 running, 124 sleeping,   0 stopped,   0 zombie
%Cpu(s):  2.3 us,  1.2 sy,  0.0 ni, 96.4 id,  0.1 wa,  0.0 hi,  0.0 si,  0.0 st
MiB Mem :  16384.0 total,  12543.2 free,   2456.8 used,   1384.0 buff/cache

  PID USER      PR  NI    VIRT    RES    SHR S  %CPU  %MEM     TIME+ COMMAND
 1234 user      20   0 2547892 345678  12345 S   5.2   2.1   0:23.45 python train.py";

const PIP_LIST: &str = "Package           Version
-----------       -------
numpy             1.21.0
pandas            1.3.0
torch             1.9.0
scikit-learn      0.24.2";

/// tensorboard --logdir DIR
pub struct TensorboardCommand;

impl Command for TensorboardCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> HandlerResult {
        let has_logdir = args
            .first()
            .is_some_and(|a| a == "--logdir" || a.starts_with("--logdir="));
        if has_logdir {
            Ok(CommandResult::text(
                "TensorBoard 2.8.0 at http://localhost:6006/ (Press CTRL+C to quit)",
            ))
        } else {
            Ok(CommandResult::text(TENSORBOARD_USAGE))
        }
    }

    fn summary(&self) -> &str {
        "Start the TensorBoard server"
    }

    fn usage(&self) -> &str {
        TENSORBOARD_USAGE
    }
}

/// pip list | pip install PACKAGE
pub struct PipCommand;

impl Command for PipCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> HandlerResult {
        let out = match args {
            [cmd, ..] if cmd == "list" => PIP_LIST.to_string(),
            [cmd, package, ..] if cmd == "install" => {
                format!("Installing {}...\nSuccessfully installed {}", package, package)
            }
            _ => PIP_USAGE.to_string(),
        };
        Ok(CommandResult::text(out))
    }

    fn summary(&self) -> &str {
        "Python package manager"
    }

    fn usage(&self) -> &str {
        PIP_USAGE
    }
}

fn wandb() -> CannedCommand {
    CannedCommand::new("Weights & Biases CLI")
        .respond("login", "Successfully logged in to Weights & Biases!")
        .respond("init", "Initialized W&B project: ai-tutorial")
        .respond("status", "Logged in as: ai-developer\nCurrent project: ai-tutorial")
        .fallback_error("wandb: command not found. Run \"wandb --help\" for usage.")
}

fn jupyter() -> CannedCommand {
    CannedCommand::new("Start a Jupyter server")
        .respond(
            "notebook",
            "Starting Jupyter Notebook server...
[I 10:30:00.123 NotebookApp] Serving notebooks from /current/directory
[I 10:30:00.123 NotebookApp] The Jupyter Notebook is running at:
[I 10:30:00.123 NotebookApp] http://localhost:8888/",
        )
        .respond(
            "lab",
            "Starting JupyterLab server...
[I 10:30:00.123 ServerApp] jupyterlab | extension was successfully loaded.
[I 10:30:00.123 ServerApp] http://localhost:8888/lab",
        )
        .fallback("usage: jupyter {notebook|lab|console}")
}

fn conda() -> CannedCommand {
    CannedCommand::new("Conda environment manager")
        .respond(
            "list",
            "numpy                     1.21.0
pandas                    1.3.0
pytorch                   1.9.0
scikit-learn              0.24.2",
        )
        .respond("info", "Active environment: ai-env\nPython version: 3.9.2")
        .respond(
            "env list",
            "# conda environments:
base                  /opt/conda
ai-env              * /opt/conda/envs/ai-env",
        )
        .fallback("usage: conda {list|info|env}")
}

pub fn register(registry: &mut CommandRegistry) {
    registry.register("tensorboard", TensorboardCommand);
    registry.register("wandb", wandb());
    registry.register("jupyter", jupyter());
    registry.register("conda", conda());
    registry.register("pip", PipCommand);
    registry.register("nvidia-smi", CannedCommand::new("Show GPU status").fallback(NVIDIA_SMI));
    registry.register("htop", CannedCommand::new("Show running processes").fallback(HTOP));
}

const PROJECT_FILES: &[(&str, &str)] = &[
    (
        "model.py",
        "import torch
import torch.nn as nn

class AIModel(nn.Module):
    def __init__(self):
        super().__init__()
        self.layer = nn.Linear(10, 1)

    def forward(self, x):
        return self.layer(x)",
    ),
    (
        "train.py",
        "from model import AIModel
import torch

def train():
    model = AIModel()
    # Training code here
    print(\"Training complete!\")

if __name__ == \"__main__\":
    train()",
    ),
    (
        "config.json",
        "{
  \"learning_rate\": 0.001,
  \"batch_size\": 32,
  \"epochs\": 100
}",
    ),
    ("requirements.txt", "torch==1.9.0\nnumpy==1.21.0\npandas==1.3.0\nscikit-learn==0.24.2"),
    (".gitignore", "__pycache__/\n*.pth\ndata/processed/"),
    (
        "README.md",
        "# AI Terminal Tutorial

Welcome to the AI Terminal Tutorial!

## Getting Started

1. Run `python train.py` to start training
2. Check results with `ls`
3. Edit files with `nvim`",
    ),
    ("data/train.csv", "feature_1,feature_2,label\n0.12,0.80,1\n0.45,0.33,0"),
    ("data/test.csv", "feature_1,feature_2,label\n0.91,0.05,0"),
    ("data/validation.csv", "feature_1,feature_2,label\n0.27,0.64,1"),
    ("data/processed/features.npy", ""),
    ("data/processed/labels.npy", ""),
    ("data/processed/scaler.pkl", ""),
];

/// Write the sample project under `home`, overwriting existing files.
pub fn seed_project(vfs: &mut VirtualFileSystem, home: &str) -> Result<(), FsError> {
    vfs.create_dir_all(&join(home, "data/processed"))?;
    for (name, content) in PROJECT_FILES {
        vfs.write_file(&join(home, name), content)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{args, test_ctx};
    use crate::vfs::ListOptions;

    #[test]
    fn test_pip() {
        let mut ctx = test_ctx();
        let out = PipCommand.execute(&args(&["install", "wandb"]), &mut ctx).unwrap();
        assert_eq!(out.lines, vec!["Installing wandb...", "Successfully installed wandb"]);
        let out = PipCommand.execute(&args(&["install"]), &mut ctx).unwrap();
        assert_eq!(out.output(), PIP_USAGE);
        let out = PipCommand.execute(&args(&["list"]), &mut ctx).unwrap();
        assert_eq!(out.lines.len(), 6);
    }

    #[test]
    fn test_tensorboard() {
        let mut ctx = test_ctx();
        let out = TensorboardCommand
            .execute(&args(&["--logdir", "runs"]), &mut ctx)
            .unwrap();
        assert!(out.output().starts_with("TensorBoard 2.8.0"));
        let out = TensorboardCommand.execute(&[], &mut ctx).unwrap();
        assert_eq!(out.output(), TENSORBOARD_USAGE);
    }

    #[test]
    fn test_static_outputs_ignore_args() {
        let mut reg = CommandRegistry::new();
        register(&mut reg);
        let mut ctx = test_ctx();
        let smi = reg.get("nvidia-smi").unwrap();
        let out = smi.execute(&[], &mut ctx).unwrap();
        assert_eq!(out.lines.len(), 11);
        assert_eq!(out, smi.execute(&args(&["-l"]), &mut ctx).unwrap());
    }

    #[test]
    fn test_seed_project() {
        let mut ctx = test_ctx();
        seed_project(&mut ctx.vfs, "/home/user").unwrap();
        let names: Vec<_> = ctx
            .vfs
            .list("/home/user", ListOptions::default())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(
            names,
            vec!["data", "model.py", "train.py", "config.json", "requirements.txt", "README.md"]
        );
        assert!(ctx.vfs.exists("/home/user/data/processed/scaler.pkl"));
        assert!(ctx.vfs.read("/home/user/model.py").unwrap().starts_with("import torch"));
    }
}
